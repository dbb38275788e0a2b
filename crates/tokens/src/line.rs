//! A single line of a token file.
//!
//! Every line keeps its raw text, line terminator included, so that
//! serializing an unedited line reproduces it exactly.

use crate::error::{Result, TokenError};

/// What a token file line contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A line whose trimmed form starts with `#`.
    Comment,
    /// A line that is empty once trimmed.
    Blank,
    /// An `alias:token` line, split on the first `:` and trimmed.
    Pair {
        /// The alias (never contains `:`).
        alias: String,
        /// The token (may contain `:`).
        token: String,
    },
}

/// A tagged line of a token file.
///
/// # Examples
///
/// ```
/// use rcurl_tokens::{Entry, TokenLine};
///
/// let line = TokenLine::parse("work: abc:123\n", 1).unwrap();
/// assert_eq!(line.alias(), Some("work"));
/// assert_eq!(line.token(), Some("abc:123"));
/// assert_eq!(line.raw(), "work: abc:123\n");
///
/// let comment = TokenLine::parse("  # note\n", 2).unwrap();
/// assert_eq!(comment.entry(), &Entry::Comment);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLine {
    raw: String,
    entry: Entry,
}

impl TokenLine {
    /// Classifies one raw line.
    ///
    /// `raw` may carry its trailing `\n` or `\r\n`; it is kept as-is.
    /// `line_no` is 1-based and only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if the line is neither a comment nor blank and has
    /// no `:`, or if either side of the `:` is empty.
    pub fn parse(raw: &str, line_no: usize) -> Result<Self> {
        let trimmed = raw.trim();

        let entry = if trimmed.is_empty() {
            Entry::Blank
        } else if trimmed.starts_with('#') {
            Entry::Comment
        } else {
            let Some((alias, token)) = trimmed.split_once(':') else {
                return Err(TokenError::MalformedLine {
                    line: line_no,
                    content: trimmed.to_string(),
                });
            };
            let (alias, token) = (alias.trim(), token.trim());
            if alias.is_empty() || token.is_empty() {
                return Err(TokenError::EmptyEntry { line: line_no });
            }
            Entry::Pair {
                alias: alias.to_string(),
                token: token.to_string(),
            }
        };

        Ok(Self {
            raw: raw.to_string(),
            entry,
        })
    }

    /// Builds a fresh `alias:token` line terminated by `\n`.
    ///
    /// Callers are expected to have validated both halves.
    #[must_use]
    pub fn pair(alias: &str, token: &str) -> Self {
        Self {
            raw: format!("{alias}:{token}\n"),
            entry: Entry::Pair {
                alias: alias.to_string(),
                token: token.to_string(),
            },
        }
    }

    /// Replaces the token of a pair line, keeping the line terminator.
    ///
    /// Has no effect on comment or blank lines.
    pub fn replace_token(&mut self, token: &str) {
        let Entry::Pair { alias, .. } = &self.entry else {
            return;
        };
        let alias = alias.clone();
        let ending = self.line_ending();
        self.raw = format!("{alias}:{token}{ending}");
        self.entry = Entry::Pair {
            alias,
            token: token.to_string(),
        };
    }

    /// Appends a `\n` if the line has no terminator.
    pub fn ensure_terminated(&mut self) {
        if !self.raw.ends_with('\n') {
            self.raw.push('\n');
        }
    }

    /// Returns the raw text of the line, terminator included.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns what the line contains.
    #[must_use]
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Returns the alias if this is a pair line.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        match &self.entry {
            Entry::Pair { alias, .. } => Some(alias),
            _ => None,
        }
    }

    /// Returns the token if this is a pair line.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match &self.entry {
            Entry::Pair { token, .. } => Some(token),
            _ => None,
        }
    }

    /// Returns whether this is a pair line.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.entry, Entry::Pair { .. })
    }

    fn line_ending(&self) -> &'static str {
        if self.raw.ends_with("\r\n") {
            "\r\n"
        } else if self.raw.ends_with('\n') {
            "\n"
        } else {
            ""
        }
    }
}
