//! Alias to credential resolution.
//!
//! Request-issuing commands name a token alias (or the `default` sentinel);
//! this module turns that into the token and the headers to attach.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::persistence::load_and_validate;

/// Header carrying the credential.
pub const AUTHORIZATION: &str = "Authorization";

/// A resolved credential.
///
/// # Security
///
/// The token is held in a [`SecretString`] so it does not show up in
/// `Debug` output or logs.
pub struct SavedToken {
    token: SecretString,
    token_type: String,
}

impl SavedToken {
    /// Wraps a token and its authorization scheme.
    #[must_use]
    pub fn new(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self {
            token: SecretString::from(token.into()),
            token_type: token_type.into(),
        }
    }

    /// Returns the raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Returns the authorization scheme, e.g. `Bearer`.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the `Authorization` header value.
    ///
    /// An empty scheme sends the token alone, with no leading space, for
    /// servers that expect a raw token in `Authorization`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rcurl_config::auth::SavedToken;
    ///
    /// assert_eq!(SavedToken::new("abc", "Bearer").authorization(), "Bearer abc");
    /// assert_eq!(SavedToken::new("abc", "").authorization(), "abc");
    /// ```
    #[must_use]
    pub fn authorization(&self) -> String {
        if self.token_type.is_empty() {
            self.token().to_string()
        } else {
            format!("{} {}", self.token_type, self.token())
        }
    }

    /// Returns the headers a request should carry.
    #[must_use]
    pub fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(AUTHORIZATION.to_string(), self.authorization())])
    }

    /// Consumes the credential into `(token, headers)`.
    #[must_use]
    pub fn into_parts(self) -> (String, BTreeMap<String, String>) {
        let headers = self.headers();
        (self.token.expose_secret().to_string(), headers)
    }
}

impl fmt::Debug for SavedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SavedToken")
            .field("token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Resolves `alias` against the token file named by `config`.
///
/// The `default` sentinel resolves to `auth.default_token`.
///
/// # Errors
///
/// Returns a token store error if the token file is missing or malformed,
/// the alias is unknown, or the sentinel is used without a usable default.
///
/// # Examples
///
/// ```no_run
/// use rcurl_config::{Config, auth::get_saved_token};
///
/// # fn example() -> rcurl_config::Result<()> {
/// let config = Config::load_from("/home/me/.rcurl/config.json")?;
/// let (token, headers) = get_saved_token("default", &config)?.into_parts();
/// # Ok(())
/// # }
/// ```
#[instrument(skip(config))]
pub fn get_saved_token(alias: &str, config: &Config) -> Result<SavedToken> {
    let token_path = config.token_path();
    let token = rcurl_tokens::resolve(&token_path, alias, config.default_alias())?;
    debug!(token_file = %token_path.display(), "resolved token");
    Ok(SavedToken::new(token, config.auth.token_type.clone()))
}

/// Loads the configuration at `config_path` and resolves `alias`.
///
/// # Errors
///
/// Returns a configuration error if the file is missing or invalid, or any
/// error of [`get_saved_token`].
pub fn load_saved_token(config_path: &Path, alias: &str) -> Result<SavedToken> {
    let config = load_and_validate(config_path)?;
    get_saved_token(alias, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, ErrorKind};
    use crate::persistence::write;
    use rcurl_tokens::TokenError;
    use std::fs;
    use tempfile::TempDir;

    fn setup(tokens: &str, default: Option<&str>) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let token_path = dir.path().join("tokens");
        fs::write(&token_path, tokens).unwrap();
        let mut config = Config::for_token_path(&token_path);
        config.auth.default_token = default.map(ToString::to_string);
        (dir, config)
    }

    #[test]
    fn default_alias_end_to_end() {
        let (dir, config) = setup("# alias:token\nwork:abc123\n", Some("work"));
        let config_path = dir.path().join("config.json");
        write(&config_path, &config).unwrap();

        let (token, headers) = load_saved_token(&config_path, "default")
            .unwrap()
            .into_parts();
        assert_eq!(token, "abc123");
        assert_eq!(
            headers,
            BTreeMap::from([(
                "Authorization".to_string(),
                "Bearer abc123".to_string()
            )])
        );
    }

    #[test]
    fn explicit_alias() {
        let (_dir, config) = setup("work:abc\npersonal:def:with:colons\n", None);
        let saved = get_saved_token("personal", &config).unwrap();
        assert_eq!(saved.token(), "def:with:colons");
        assert_eq!(saved.token_type(), "Bearer");
    }

    #[test]
    fn unknown_alias() {
        let (_dir, config) = setup("work:abc\n", None);
        let err = get_saved_token("nope", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(
            err,
            ConfigError::Token(TokenError::AliasNotFound { .. })
        ));
    }

    #[test]
    fn sentinel_without_default() {
        let (_dir, config) = setup("work:abc\n", None);
        let err = get_saved_token("default", &config).unwrap_err();
        assert!(matches!(err, ConfigError::Token(TokenError::DefaultNotSet)));
    }

    #[test]
    fn sentinel_with_missing_default() {
        let (_dir, config) = setup("work:abc\n", Some("gone"));
        let err = get_saved_token("default", &config).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(matches!(
            err,
            ConfigError::Token(TokenError::DefaultAliasMissing { .. })
        ));
    }

    #[test]
    fn missing_token_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_token_path(&dir.path().join("absent"));
        let err = get_saved_token("work", &config).unwrap_err();
        assert!(matches!(err, ConfigError::Token(TokenError::NotFound { .. })));
    }

    #[test]
    fn empty_token_type_sends_bare_token() {
        let (_dir, mut config) = setup("work:abc123\n", None);
        config.auth.token_type = String::new();
        let (_, headers) = get_saved_token("work", &config).unwrap().into_parts();
        assert_eq!(headers["Authorization"], "abc123");
    }

    #[test]
    fn debug_hides_token() {
        let saved = SavedToken::new("super-secret", "Bearer");
        let debug = format!("{saved:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("Bearer"));
    }
}
