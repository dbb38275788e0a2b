//! Configuration management for the rcurl application.
//!
//! This crate owns the configuration file lifecycle: validating it,
//! reading and writing it, deciding how `config generate` should produce a
//! new one, and resolving token aliases through the file it points at.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: The validated configuration record
//! - [`validation`]: Structural checks that accumulate every error
//! - [`persistence`]: Config file reading, writing, and backup
//! - [`paths`]: Default file locations and `~` expansion
//! - [`mode`]: Flag resolution for `config generate`
//! - [`wizard`]: Prompt-driven record building
//! - [`generate`]: The generate workflow from flags to written file
//! - [`init`]: First-run setup
//! - [`auth`]: Alias to credential resolution
//! - [`error`]: Error types for configuration operations
//!
//! # File Format
//!
//! ```json
//! {
//!     "auth": {
//!         "token_file": "/home/me/.rcurl/tokens",
//!         "token_type": "Bearer",
//!         "default_token": null
//!     }
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//! use rcurl_config::{Config, auth::get_saved_token, paths::default_paths};
//!
//! # fn example() -> rcurl_config::Result<()> {
//! let paths = default_paths(Path::new("/home/me"));
//! let config = Config::load_from(&paths.config_path)?;
//!
//! let saved = get_saved_token("default", &config)?;
//! println!("Authorization: {}", saved.authorization());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod generate;
pub mod init;
pub mod mode;
pub mod paths;
pub mod persistence;
pub mod validation;
pub mod wizard;

// Re-export primary types at crate root for convenience
pub use auth::SavedToken;
pub use config::{AuthConfig, Config};
pub use error::{ConfigError, ErrorKind, Result};
pub use mode::{ConfigMode, GenerateOptions};
pub use paths::Paths;
pub use validation::{ValidationError, ValidationErrors};
pub use wizard::Prompter;
