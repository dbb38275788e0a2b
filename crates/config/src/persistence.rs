//! Configuration file reading, writing, and backup.
//!
//! The configuration file is JSON. It is read with a JSON5 parser so that
//! hand-edited files with comments or trailing commas still load, and it is
//! always written back as plain JSON with four-space indentation.
//!
//! Writes overwrite the file in place and no lock is taken. A backup
//! followed by a write is two separate filesystem operations.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::{Config, set_dotted};
use crate::error::{ConfigError, Result};
use crate::paths::{BACKUP_DIR, resolve_path};
use crate::validation::validate;

/// Timestamp format used in backup file names.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Reads and parses a configuration file without validating it.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if the file does not exist,
/// [`ConfigError::Encoding`] if it is not UTF-8 text, and
/// [`ConfigError::Parse`] if it is not structured data.
///
/// # Examples
///
/// ```no_run
/// use rcurl_config::persistence::load;
///
/// # fn main() -> rcurl_config::Result<()> {
/// let raw = load("/home/me/.rcurl/config.json")?;
/// println!("{}", raw["auth"]["token_type"]);
/// # Ok(())
/// # }
/// ```
pub fn load(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        // read_to_string reports invalid UTF-8 this way
        std::io::ErrorKind::InvalidData => ConfigError::Encoding {
            path: path.to_path_buf(),
        },
        _ => ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Loads a configuration file and validates it.
///
/// # Errors
///
/// Returns the errors of [`load`], or [`ConfigError::Invalid`] carrying
/// every validation error.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let raw = load(path)?;
    let config = validate(&raw).map_err(|errors| ConfigError::Invalid {
        path: path.to_path_buf(),
        errors,
    })?;
    debug!("loaded valid config");
    Ok(config)
}

/// Serializes a value as JSON with four-space indentation.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes a configuration to a file.
///
/// Parent directories are created if needed and the file is overwritten.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
///
/// # Examples
///
/// ```no_run
/// use rcurl_config::Config;
/// use rcurl_config::persistence::write;
///
/// # fn main() -> rcurl_config::Result<()> {
/// let config = Config::with_defaults("/home/me/.rcurl/tokens");
/// write("/home/me/.rcurl/config.json", &config)?;
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn write(path: impl AsRef<Path>, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    // Create parent directories if needed
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut content = to_json_string(config)?;
    content.push('\n');
    fs::write(path, content).map_err(write_err)?;
    debug!("wrote config");
    Ok(())
}

/// Returns the backup path for `path` at the current local time.
#[must_use]
pub fn backup_path(path: &Path) -> PathBuf {
    let dir = path.parent().unwrap_or_else(|| Path::new(".")).join(BACKUP_DIR);
    let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
    dir.join(format!("config_{timestamp}.json"))
}

/// Copies the configuration file into the sibling `backup/` directory.
///
/// Returns the path of the copy, `backup/config_<YYYY-MM-DD_HH-MM-SS>.json`.
/// Two backups within the same second share a name; the later one wins.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if there is nothing to back up.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn backup(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let target = backup_path(path);
    let backup_err = |source| ConfigError::Backup {
        path: target.clone(),
        source,
    };
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir).map_err(backup_err)?;
    }
    fs::copy(path, &target).map_err(backup_err)?;

    debug!(backup = %target.display(), "backed up config");
    Ok(target)
}

/// Sets one dotted key in the configuration file and rewrites it.
///
/// The raw file is loaded (it need not be valid beforehand), the key is
/// set, and the whole record must then pass validation before anything is
/// written.
///
/// - `auth.token_file` is expanded and made absolute; if no file exists
///   there, one is created from the token file template.
/// - `auth.default_token` set to an empty value becomes `null`.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded, the key is unknown, the
/// result fails validation, or a file cannot be written.
#[instrument(skip_all, fields(path = %path.as_ref().display(), key))]
pub fn set_key(path: impl AsRef<Path>, key: &str, value: &str) -> Result<Config> {
    let path = path.as_ref();
    let mut raw = load(path)?;

    let value = match key {
        "auth.token_file" => {
            let token_path = resolve_path(value.trim());
            if !token_path.exists() {
                debug!(token_file = %token_path.display(), "seeding missing token file");
                rcurl_tokens::write_template(&token_path)?;
            }
            Value::String(token_path.to_string_lossy().into_owned())
        }
        "auth.default_token" if value.trim().is_empty() => Value::Null,
        _ => Value::String(value.to_string()),
    };

    set_dotted(&mut raw, key, value)?;
    let config = validate(&raw)?;
    write(path, &config)?;
    Ok(config)
}
