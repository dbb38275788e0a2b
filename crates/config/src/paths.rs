//! Default file locations.
//!
//! Paths are computed from an explicit home directory and threaded through
//! every component; there is no process-wide path state.
//!
//! ```text
//! ~/.rcurl/
//! ├── config.json
//! ├── tokens
//! └── backup/
//!     └── config_2026-10-19_14-03-22.json
//! ```

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Application directory name under the home directory.
pub const APP_DIR: &str = ".rcurl";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default token file name.
pub const TOKEN_FILE_NAME: &str = "tokens";

/// Backup directory name, next to the configuration file.
pub const BACKUP_DIR: &str = "backup";

/// The configuration and token file locations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Where the configuration file lives.
    pub config_path: PathBuf,
    /// Where a freshly generated configuration points its token file.
    pub token_path: PathBuf,
}

/// Returns the default locations under `home`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rcurl_config::paths::default_paths;
///
/// let paths = default_paths(Path::new("/home/me"));
/// assert_eq!(paths.config_path, Path::new("/home/me/.rcurl/config.json"));
/// assert_eq!(paths.token_path, Path::new("/home/me/.rcurl/tokens"));
/// ```
#[must_use]
pub fn default_paths(home: &Path) -> Paths {
    let dir = home.join(APP_DIR);
    Paths {
        config_path: dir.join(CONFIG_FILE_NAME),
        token_path: dir.join(TOKEN_FILE_NAME),
    }
}

/// Returns the current user's home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or(ConfigError::NoHomeDirectory)
}

/// Expands a leading `~` against `home`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use rcurl_config::paths::expand_home;
///
/// let home = Path::new("/home/me");
/// assert_eq!(expand_home("~/tokens", home), Path::new("/home/me/tokens"));
/// assert_eq!(expand_home("~", home), Path::new("/home/me"));
/// assert_eq!(expand_home("/etc/tokens", home), Path::new("/etc/tokens"));
/// ```
#[must_use]
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

/// Expands a leading `~` against the current user's home directory.
///
/// Left untouched if no home directory can be found.
#[must_use]
pub fn expand_path(raw: &str) -> PathBuf {
    match dirs::home_dir() {
        Some(home) => expand_home(raw, &home),
        None => PathBuf::from(raw),
    }
}

/// Expands `~` and makes the path absolute against the working directory.
#[must_use]
pub fn resolve_path(raw: &str) -> PathBuf {
    let expanded = expand_path(raw);
    std::path::absolute(&expanded).unwrap_or(expanded)
}
