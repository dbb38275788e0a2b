//! Error types for token store operations.
//!
//! Parse errors are fatal for the whole file: a token file with a single
//! malformed line is rejected rather than partially loaded.

use std::path::PathBuf;

/// Broad classification shared by every rcurl error type.
///
/// Command boundaries match on this to pick remediation hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An expected file, alias, or value is absent.
    NotFound,
    /// A file exists but fails to parse or fails schema/grammar checks.
    InvalidFormat,
    /// Mutually exclusive options were requested together.
    Conflict,
    /// The filesystem or terminal failed underneath us.
    Io,
}

/// Errors that can occur during token store operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The token file does not exist.
    #[error("token file not found at {}", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Failed to read the token file.
    #[error("failed to read token file at {}: {source}", .path.display())]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the token file.
    #[error("failed to write token file at {}: {source}", .path.display())]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The token file is not valid UTF-8.
    #[error("token file at {} is not valid UTF-8 text", .path.display())]
    Encoding {
        /// The offending file.
        path: PathBuf,
    },

    /// A data line has no `:` separator.
    #[error("invalid token format at line {line}: {content}")]
    MalformedLine {
        /// The 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        content: String,
    },

    /// A data line has an empty alias or an empty token.
    #[error("empty alias or token at line {line}")]
    EmptyEntry {
        /// The 1-based line number.
        line: usize,
    },

    /// The same alias appears on two data lines.
    #[error("duplicate alias '{alias}' at line {line}")]
    DuplicateAlias {
        /// The repeated alias.
        alias: String,
        /// The 1-based line number of the second occurrence.
        line: usize,
    },

    /// An alias cannot be stored.
    #[error("invalid alias '{alias}': {reason}")]
    InvalidAlias {
        /// The rejected alias.
        alias: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A token value cannot be stored.
    #[error("invalid token: {reason}")]
    InvalidToken {
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The requested alias is not in the store.
    #[error("token alias '{alias}' not found")]
    AliasNotFound {
        /// The alias that was looked up.
        alias: String,
    },

    /// The `default` sentinel was used but no default alias is configured.
    #[error("no default token alias is set in the config")]
    DefaultNotSet,

    /// The configured default alias is not in the store.
    #[error("default token alias '{alias}' not found in token file")]
    DefaultAliasMissing {
        /// The configured default alias.
        alias: String,
    },
}

impl TokenError {
    /// Returns the broad classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. }
            | Self::AliasNotFound { .. }
            | Self::DefaultNotSet
            | Self::DefaultAliasMissing { .. } => ErrorKind::NotFound,
            Self::Encoding { .. }
            | Self::MalformedLine { .. }
            | Self::EmptyEntry { .. }
            | Self::DuplicateAlias { .. }
            | Self::InvalidAlias { .. }
            | Self::InvalidToken { .. } => ErrorKind::InvalidFormat,
            Self::ReadFile { .. } | Self::WriteFile { .. } => ErrorKind::Io,
        }
    }
}

/// A specialized Result type for token store operations.
pub type Result<T> = std::result::Result<T, TokenError>;
