//! The token file as an ordered sequence of tagged lines.
//!
//! [`TokenFile`] is the in-memory model; the free functions ([`parse`],
//! [`set_alias`], [`remove_alias`], [`remove_all`], [`resolve`]) read the
//! file fresh, apply one edit, and write it back. Nothing is cached between
//! calls and no lock is taken, so two processes editing the same file at
//! the same time can lose an update.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::error::{Result, TokenError};
use crate::line::TokenLine;

/// Alias that always refers to the configured default alias.
pub const DEFAULT_ALIAS: &str = "default";

/// Content written to a freshly created token file.
pub const TOKEN_FILE_TEMPLATE: &str = "# alias:token\n# example\n# localhost:eyJhbGciOi...\n";

/// What [`TokenFile::set`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// A new pair line was appended.
    Added,
    /// An existing pair line got a new token, in place.
    Updated,
    /// The alias already mapped to this token; nothing changed.
    Unchanged,
}

/// A parsed token file.
///
/// Serializing with [`fmt::Display`] reproduces every line that was not
/// edited byte for byte.
///
/// # Examples
///
/// ```
/// use rcurl_tokens::{SetOutcome, TokenFile};
///
/// let mut file = TokenFile::default();
/// assert_eq!(file.set("work", "abc").unwrap(), SetOutcome::Added);
/// assert_eq!(file.set("work", "abc").unwrap(), SetOutcome::Unchanged);
/// assert_eq!(file.set("work", "xyz").unwrap(), SetOutcome::Updated);
/// assert_eq!(file.get("work"), Some("xyz"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFile {
    lines: Vec<TokenLine>,
}

impl FromStr for TokenFile {
    type Err = TokenError;

    fn from_str(content: &str) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();

        for (idx, raw) in content.split_inclusive('\n').enumerate() {
            let line_no = idx + 1;
            let line = TokenLine::parse(raw, line_no)?;
            if let Some(alias) = line.alias()
                && !seen.insert(alias.to_string())
            {
                return Err(TokenError::DuplicateAlias {
                    alias: alias.to_string(),
                    line: line_no,
                });
            }
            lines.push(line);
        }

        Ok(Self { lines })
    }
}

impl fmt::Display for TokenFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line.raw())?;
        }
        Ok(())
    }
}

impl TokenFile {
    /// Reads and parses a token file.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::NotFound`] if the file does not exist,
    /// [`TokenError::Encoding`] if it is not UTF-8, or a parse error for the
    /// first malformed line.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => TokenError::NotFound {
                path: path.to_path_buf(),
            },
            // read_to_string reports invalid UTF-8 this way
            std::io::ErrorKind::InvalidData => TokenError::Encoding {
                path: path.to_path_buf(),
            },
            _ => TokenError::ReadFile {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let file = content.parse()?;
        debug!(path = %path.display(), "loaded token file");
        Ok(file)
    }

    /// Writes the file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_err = |source| TokenError::WriteFile {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_string()).map_err(write_err)?;
        debug!(path = %path.display(), "wrote token file");
        Ok(())
    }

    /// Returns the token stored under `alias`, without sentinel handling.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.alias() == Some(alias))
            .and_then(TokenLine::token)
    }

    /// Returns whether `alias` is stored, without sentinel handling.
    #[must_use]
    pub fn contains(&self, alias: &str) -> bool {
        self.get(alias).is_some()
    }

    /// Iterates over `(alias, token)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines
            .iter()
            .filter_map(|l| Some((l.alias()?, l.token()?)))
    }

    /// Returns the alias to token mapping.
    #[must_use]
    pub fn tokens(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(a, t)| (a.to_string(), t.to_string()))
            .collect()
    }

    /// Returns the number of stored aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.iter().filter(|l| l.is_pair()).count()
    }

    /// Returns whether no alias is stored. Comments do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every line, in file order.
    #[must_use]
    pub fn lines(&self) -> &[TokenLine] {
        &self.lines
    }

    /// Stores `token` under `alias`.
    ///
    /// An existing alias is updated in place; a new one is appended after
    /// making sure the current last line is terminated. Both values are
    /// trimmed before being stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the alias or token cannot be stored (see
    /// [`validate_alias`]).
    pub fn set(&mut self, alias: &str, token: &str) -> Result<SetOutcome> {
        let alias = alias.trim();
        let token = token.trim();
        validate_alias(alias)?;
        validate_token(token)?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.alias() == Some(alias)) {
            if line.token() == Some(token) {
                return Ok(SetOutcome::Unchanged);
            }
            line.replace_token(token);
            return Ok(SetOutcome::Updated);
        }

        if let Some(last) = self.lines.last_mut() {
            last.ensure_terminated();
        }
        self.lines.push(TokenLine::pair(alias, token));
        Ok(SetOutcome::Added)
    }

    /// Removes the pair line for `alias` and returns the alias removed.
    ///
    /// The `default` sentinel is resolved against `default_alias` first.
    /// Every other line is kept, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the sentinel is used without a default alias, or
    /// if the (resolved) alias is not stored.
    pub fn remove(&mut self, alias: &str, default_alias: Option<&str>) -> Result<String> {
        let target = resolve_sentinel(alias, default_alias)?;

        let Some(pos) = self.lines.iter().position(|l| l.alias() == Some(target)) else {
            return Err(if alias == DEFAULT_ALIAS {
                TokenError::DefaultAliasMissing {
                    alias: target.to_string(),
                }
            } else {
                TokenError::AliasNotFound {
                    alias: target.to_string(),
                }
            });
        };

        self.lines.remove(pos);
        Ok(target.to_string())
    }

    /// Removes every pair line, keeping comments and blank lines.
    ///
    /// Returns how many aliases were removed.
    pub fn remove_all(&mut self) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| !l.is_pair());
        before - self.lines.len()
    }

    /// Looks up the token for `alias`.
    ///
    /// `default` is resolved against `default_alias`, which must be set and
    /// stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the sentinel cannot be resolved or the alias is
    /// not stored.
    pub fn resolve(&self, alias: &str, default_alias: Option<&str>) -> Result<&str> {
        let target = resolve_sentinel(alias, default_alias)?;
        self.get(target).ok_or_else(|| {
            if alias == DEFAULT_ALIAS {
                TokenError::DefaultAliasMissing {
                    alias: target.to_string(),
                }
            } else {
                TokenError::AliasNotFound {
                    alias: target.to_string(),
                }
            }
        })
    }
}

/// Maps the `default` sentinel to the configured default alias.
fn resolve_sentinel<'a>(alias: &'a str, default_alias: Option<&'a str>) -> Result<&'a str> {
    if alias != DEFAULT_ALIAS {
        return Ok(alias);
    }
    default_alias
        .filter(|a| !a.is_empty())
        .ok_or(TokenError::DefaultNotSet)
}

/// Checks that `alias` can be stored as a new or updated alias.
///
/// # Errors
///
/// Returns [`TokenError::InvalidAlias`] if the alias is empty, contains `:`
/// or a line break, starts with `#`, or is the reserved `default` sentinel.
pub fn validate_alias(alias: &str) -> Result<()> {
    let reason = if alias.trim().is_empty() {
        "alias cannot be empty"
    } else if alias.contains(':') {
        "aliases cannot contain ':'"
    } else if alias.contains(['\n', '\r']) {
        "aliases cannot contain line breaks"
    } else if alias.trim_start().starts_with('#') {
        "aliases cannot start with '#'"
    } else if alias.trim() == DEFAULT_ALIAS {
        "'default' is reserved for the configured default alias"
    } else {
        return Ok(());
    };

    Err(TokenError::InvalidAlias {
        alias: alias.to_string(),
        reason,
    })
}

fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() {
        return Err(TokenError::InvalidToken {
            reason: "token cannot be empty",
        });
    }
    if token.contains(['\n', '\r']) {
        return Err(TokenError::InvalidToken {
            reason: "token cannot contain line breaks",
        });
    }
    Ok(())
}

/// Reads the token file at `path` into an alias to token mapping.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
#[instrument]
pub fn parse(path: &Path) -> Result<BTreeMap<String, String>> {
    Ok(TokenFile::load(path)?.tokens())
}

/// Stores `token` under `alias` in the file at `path`.
///
/// The file and its parent directories are created if needed. When the
/// alias already maps to `token` the file is left untouched.
///
/// # Errors
///
/// Returns an error if the file is malformed, the alias or token is
/// invalid, or the file cannot be written.
#[instrument(skip(token))]
pub fn set_alias(path: &Path, alias: &str, token: &str) -> Result<SetOutcome> {
    let mut file = match TokenFile::load(path) {
        Ok(file) => file,
        Err(TokenError::NotFound { .. }) => {
            debug!("token file missing, starting empty");
            TokenFile::default()
        }
        Err(e) => return Err(e),
    };

    let outcome = file.set(alias, token)?;
    if outcome != SetOutcome::Unchanged {
        file.save(path)?;
    }
    debug!(?outcome, "set token alias");
    Ok(outcome)
}

/// Removes `alias` (or the default alias, for the sentinel) from the file.
///
/// Returns the alias that was removed.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, or the alias is
/// not stored.
#[instrument]
pub fn remove_alias(path: &Path, alias: &str, default_alias: Option<&str>) -> Result<String> {
    let mut file = TokenFile::load(path)?;
    let removed = file.remove(alias, default_alias)?;
    file.save(path)?;
    debug!(%removed, "removed token alias");
    Ok(removed)
}

/// Removes every alias from the file, keeping comments and blank lines.
///
/// # Errors
///
/// Returns an error if the file is missing, malformed, or unwritable.
#[instrument]
pub fn remove_all(path: &Path) -> Result<usize> {
    let mut file = TokenFile::load(path)?;
    let removed = file.remove_all();
    file.save(path)?;
    debug!(removed, "removed all token aliases");
    Ok(removed)
}

/// Resolves `alias` to its token using the file at `path`.
///
/// # Errors
///
/// See [`TokenFile::resolve`]; also fails if the file is missing or
/// malformed.
#[instrument]
pub fn resolve(path: &Path, alias: &str, default_alias: Option<&str>) -> Result<String> {
    let file = TokenFile::load(path)?;
    file.resolve(alias, default_alias).map(str::to_string)
}

/// Writes [`TOKEN_FILE_TEMPLATE`] to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_template(path: &Path) -> Result<()> {
    let file: TokenFile = TOKEN_FILE_TEMPLATE.parse()?;
    file.save(path)
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_tokens() -> impl Strategy<Value = BTreeMap<String, String>> {
        prop::collection::btree_map(
            "[a-zA-Z0-9_.-]{1,12}".prop_filter("sentinel", |a| a != DEFAULT_ALIAS),
            "[a-zA-Z0-9:._=+/-]{1,40}",
            0..12,
        )
    }

    proptest! {
        /// Tests that serializing a store and parsing it back yields the same mapping.
        #[test]
        fn tokens_roundtrip(tokens in arb_tokens()) {
            let mut file = TokenFile::default();
            for (alias, token) in &tokens {
                file.set(alias, token).expect("set");
            }
            let parsed: TokenFile = file.to_string().parse().expect("parse");
            prop_assert_eq!(parsed.tokens(), tokens);
        }

        /// Tests that setting the same pair twice never changes the serialized file.
        #[test]
        fn set_is_idempotent(tokens in arb_tokens(), alias in "[a-z]{1,8}", token in "[a-z0-9]{1,16}") {
            prop_assume!(alias != DEFAULT_ALIAS);
            let mut file = TokenFile::default();
            for (a, t) in &tokens {
                file.set(a, t).expect("set");
            }
            file.set(&alias, &token).expect("first set");
            let once = file.to_string();
            prop_assert_eq!(file.set(&alias, &token).expect("second set"), SetOutcome::Unchanged);
            prop_assert_eq!(file.to_string(), once);
        }

        /// Tests that removing one alias leaves every other line untouched and in order.
        #[test]
        fn remove_preserves_other_lines(tokens in arb_tokens()) {
            prop_assume!(!tokens.is_empty());
            let mut file: TokenFile = "# header\n\n".parse().expect("parse");
            for (a, t) in &tokens {
                file.set(a, t).expect("set");
            }
            let victim = tokens.keys().next().expect("non-empty").clone();
            let expected: Vec<String> = file
                .lines()
                .iter()
                .filter(|l| l.alias() != Some(victim.as_str()))
                .map(|l| l.raw().to_string())
                .collect();

            file.remove(&victim, None).expect("remove");
            let actual: Vec<String> = file.lines().iter().map(|l| l.raw().to_string()).collect();
            prop_assert_eq!(actual, expected);
            prop_assert!(!file.contains(&victim));
        }
    }
}
