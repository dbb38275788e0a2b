//! First-run setup: a default configuration and a seeded token file.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::paths::{Paths, resolve_path};
use crate::persistence::write;

/// What [`initialize`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// A configuration file was written.
    pub config_created: bool,
    /// A token file was written from the template.
    pub token_file_created: bool,
    /// The token file the configuration points at.
    pub token_path: PathBuf,
}

impl InitReport {
    /// Returns `true` if nothing needed doing.
    #[must_use]
    pub fn already_initialized(&self) -> bool {
        !self.config_created && !self.token_file_created
    }
}

/// Creates the configuration and token files if they are missing.
///
/// `token_file` overrides the default token location; it is expanded and
/// made absolute. Existing files are left alone unless `overwrite` is set.
///
/// # Errors
///
/// Returns [`ConfigError::TokenFileIsConfig`] if both paths coincide, or an
/// error if a file cannot be written.
#[instrument(skip_all, fields(config = %paths.config_path.display(), overwrite))]
pub fn initialize(paths: &Paths, token_file: Option<&Path>, overwrite: bool) -> Result<InitReport> {
    let token_path = match token_file {
        Some(path) => resolve_path(&path.to_string_lossy()),
        None => paths.token_path.clone(),
    };
    let config_path = resolve_path(&paths.config_path.to_string_lossy());
    if resolve_path(&token_path.to_string_lossy()) == config_path {
        return Err(ConfigError::TokenFileIsConfig { path: config_path });
    }

    let config_created = overwrite || !paths.config_path.exists();
    if config_created {
        write(&paths.config_path, &Config::for_token_path(&token_path))?;
    }

    let token_file_created = overwrite || !token_path.exists();
    if token_file_created {
        rcurl_tokens::write_template(&token_path)?;
    }

    debug!(config_created, token_file_created, "initialized");
    Ok(InitReport {
        config_created,
        token_file_created,
        token_path,
    })
}
