//! Error types for configuration operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing, validation, mode resolution, and generation.

use std::path::PathBuf;

pub use rcurl_tokens::ErrorKind;

use crate::validation::ValidationErrors;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("config not found at {}", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// Failed to read a configuration file.
    #[error("failed to read config file at {}: {source}", .path.display())]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {}: {source}", .path.display())]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy the configuration file into the backup directory.
    #[error("failed to back up config to {}: {source}", .path.display())]
    Backup {
        /// The backup destination.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parser error.
        #[source]
        source: serde_json5::Error,
    },

    /// The configuration file is not valid UTF-8.
    #[error("config file at {} is not valid UTF-8 text", .path.display())]
    Encoding {
        /// The offending file.
        path: PathBuf,
    },

    /// The configuration file parsed but failed schema validation.
    ///
    /// Every validation error is kept so callers can report all of them.
    #[error("config at {} failed validation: {errors}", .path.display())]
    Invalid {
        /// The file that failed validation.
        path: PathBuf,
        /// Every problem found.
        errors: ValidationErrors,
    },

    /// An in-memory record failed schema validation.
    #[error("config failed validation: {0}")]
    Validation(#[from] ValidationErrors),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Mutually exclusive options were combined.
    #[error("{0}")]
    Conflict(String),

    /// `--modify` was requested but there is nothing to modify.
    #[error("cannot modify config: config file does not exist")]
    NothingToModify,

    /// A dotted key does not address a settable config value.
    #[error("unknown config key '{key}'")]
    UnknownKey {
        /// The key as given by the user.
        key: String,
    },

    /// The token file path points at the configuration file itself.
    #[error("token file and config file cannot be the same ({})", .path.display())]
    TokenFileIsConfig {
        /// The shared path.
        path: PathBuf,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,

    /// The prompt collaborator failed.
    #[error("prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    /// The user gave too many answers the validator rejected.
    #[error("no valid answer for '{label}' after {attempts} attempts")]
    PromptExhausted {
        /// The prompt label.
        label: String,
        /// How many answers were rejected.
        attempts: usize,
    },

    /// A token store operation failed.
    #[error(transparent)]
    Token(#[from] rcurl_tokens::TokenError),
}

impl ConfigError {
    /// Returns the broad classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::NothingToModify | Self::NoHomeDirectory => {
                ErrorKind::NotFound
            }
            Self::Parse { .. }
            | Self::Encoding { .. }
            | Self::Invalid { .. }
            | Self::Validation(_)
            | Self::UnknownKey { .. }
            | Self::PromptExhausted { .. } => ErrorKind::InvalidFormat,
            Self::Conflict(_) | Self::TokenFileIsConfig { .. } => ErrorKind::Conflict,
            Self::ReadFile { .. }
            | Self::WriteFile { .. }
            | Self::Backup { .. }
            | Self::SerializeJson(_)
            | Self::Prompt(_) => ErrorKind::Io,
            Self::Token(e) => e.kind(),
        }
    }

    /// Returns the validation errors carried by this error, if any.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid { errors, .. } | Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
