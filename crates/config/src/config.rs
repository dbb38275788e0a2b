//! The validated configuration record.
//!
//! A [`Config`] only ever comes out of [`crate::validation::validate`] or one
//! of the constructors here, so code holding one can rely on the schema.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::paths::expand_path;
use crate::persistence::{load_and_validate, write};

/// Default authorization scheme.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// The configuration record for the rcurl application.
///
/// # Examples
///
/// ```
/// use rcurl_config::Config;
///
/// let config = Config::with_defaults("/home/me/.rcurl/tokens");
/// assert_eq!(config.auth.token_type, "Bearer");
/// assert!(config.auth.default_token.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Authentication settings.
    pub auth: AuthConfig,
}

/// The `auth` section.
///
/// Field order here is the key order written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthConfig {
    /// Path of the token alias file. May start with `~`.
    pub token_file: String,

    /// Authorization scheme prefixed to tokens, e.g. `Bearer`. May be empty.
    pub token_type: String,

    /// Alias used when the `default` sentinel is requested.
    ///
    /// Always written, as `null` when unset.
    pub default_token: Option<String>,
}

impl Config {
    /// Creates the default configuration pointing at `token_file`.
    #[must_use]
    pub fn with_defaults(token_file: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig {
                token_file: token_file.into(),
                token_type: DEFAULT_TOKEN_TYPE.to_string(),
                default_token: None,
            },
        }
    }

    /// Creates the default configuration for a token file path.
    #[must_use]
    pub fn for_token_path(token_file: &Path) -> Self {
        Self::with_defaults(token_file.to_string_lossy())
    }

    /// Loads and validates configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unparseable, or invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rcurl_config::Config;
    ///
    /// # fn example() -> rcurl_config::Result<()> {
    /// let config = Config::load_from("/home/me/.rcurl/config.json")?;
    /// println!("tokens at {}", config.token_path().display());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        load_and_validate(path)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write(path, self)
    }

    /// Returns the token file path with `~` expanded.
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        expand_path(&self.auth.token_file)
    }

    /// Returns the configured default alias, treating `""` as unset.
    #[must_use]
    pub fn default_alias(&self) -> Option<&str> {
        self.auth.default_token.as_deref().filter(|a| !a.is_empty())
    }

    /// Looks up a value by dotted key, e.g. `auth.token_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] if the key has an empty segment or
    /// nothing lives at it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rcurl_config::Config;
    ///
    /// let config = Config::with_defaults("/t");
    /// assert_eq!(config.get("auth.token_type").unwrap(), "Bearer");
    /// assert!(config.get("auth.nope").is_err());
    /// ```
    pub fn get(&self, key: &str) -> Result<Value> {
        let unknown = || ConfigError::UnknownKey {
            key: key.to_string(),
        };
        let pointer = dotted_pointer(key).ok_or_else(unknown)?;
        let value = serde_json::to_value(self)?;
        value.pointer(&pointer).cloned().ok_or_else(unknown)
    }
}

/// Sets a value by dotted key on a raw configuration value.
///
/// Intermediate mappings are created as needed; whether the result still
/// fits the schema is for the validator to decide.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownKey`] if the key is empty or walks through
/// a non-mapping value.
pub fn set_dotted(root: &mut Value, key: &str, value: Value) -> Result<()> {
    let unknown = || ConfigError::UnknownKey {
        key: key.to_string(),
    };

    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(unknown());
    };
    if parts.iter().any(|p| p.is_empty()) {
        return Err(unknown());
    }

    let mut target = root;
    for part in parents {
        let map = target.as_object_mut().ok_or_else(unknown)?;
        target = map
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
    }

    target
        .as_object_mut()
        .ok_or_else(unknown)?
        .insert(last.to_string(), value);
    Ok(())
}

/// `None` for an empty key or one with an empty segment.
fn dotted_pointer(key: &str) -> Option<String> {
    if key.split('.').any(str::is_empty) {
        return None;
    }
    Some(format!("/{}", key.replace('.', "/")))
}
