//! Structural validation of a raw configuration value.
//!
//! The validator takes an untyped [`serde_json::Value`] (establishing the
//! type is exactly its job) and accumulates every problem it finds instead
//! of stopping at the first one, so a user sees all errors in one pass.
//!
//! # Examples
//!
//! ```
//! use rcurl_config::validation::validate;
//! use serde_json::json;
//!
//! let config = validate(&json!({
//!     "auth": { "token_file": "/t", "token_type": "Bearer", "default_token": null }
//! }))
//! .unwrap();
//! assert_eq!(config.auth.token_type, "Bearer");
//!
//! let errors = validate(&json!({
//!     "auth": { "token_file": "", "token_type": 3 },
//!     "extra": 1
//! }))
//! .unwrap_err();
//! assert_eq!(errors.len(), 3);
//! ```

use std::fmt;

use serde_json::{Map, Value};

use crate::config::{AuthConfig, Config};

/// Keys allowed at the top level.
pub const TOP_LEVEL_KEYS: &[&str] = &["auth"];

/// Keys allowed inside `auth`.
pub const AUTH_KEYS: &[&str] = &["token_file", "token_type", "default_token"];

/// One structural problem in a configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `auth` is absent or not a mapping. Nothing else can be checked.
    #[error("missing or invalid 'auth' section")]
    MissingAuth,

    /// Keys outside the schema.
    #[error("unknown keys in {section}: {}", .keys.join(", "))]
    UnknownKeys {
        /// `"top level"` or `"auth"`.
        section: &'static str,
        /// The unrecognized keys, sorted.
        keys: Vec<String>,
    },

    /// A field that must be a non-empty string is empty or not a string.
    #[error("'{field}' must be a non-empty string")]
    EmptyString {
        /// The dotted field name.
        field: &'static str,
    },

    /// A field that must be a string is not one.
    #[error("'{field}' must be a string (can be empty)")]
    NotAString {
        /// The dotted field name.
        field: &'static str,
    },

    /// A field that must be a string or null is neither.
    #[error("'{field}' must be a string or null")]
    NotStringOrNull {
        /// The dotted field name.
        field: &'static str,
    },

    /// A field contains a `:`.
    #[error("'{field}' cannot contain ':'")]
    ContainsColon {
        /// The dotted field name.
        field: &'static str,
    },
}

/// A non-empty, ordered list of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps `errors`, or returns `None` if there are none.
    #[must_use]
    pub fn new(errors: Vec<ValidationError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self(errors))
    }

    /// Returns the number of errors (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with [`Self::len`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the errors in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// Returns the errors as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validates a raw configuration value.
///
/// # Errors
///
/// Returns every problem found, in check order.
pub fn validate(value: &Value) -> Result<Config, ValidationErrors> {
    let Some(auth) = value.get("auth").and_then(Value::as_object) else {
        return Err(ValidationErrors(vec![ValidationError::MissingAuth]));
    };

    let mut errors = Vec::new();

    if let Some(top) = value.as_object()
        && let Some(keys) = unknown_keys(top, TOP_LEVEL_KEYS)
    {
        errors.push(ValidationError::UnknownKeys {
            section: "top level",
            keys,
        });
    }

    let token_file = match auth.get("token_file").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s),
        _ => {
            errors.push(ValidationError::EmptyString {
                field: "auth.token_file",
            });
            None
        }
    };

    let token_type = auth.get("token_type").and_then(Value::as_str);
    if token_type.is_none() {
        errors.push(ValidationError::NotAString {
            field: "auth.token_type",
        });
    }

    let default_token = match auth.get("default_token") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.contains(':') => {
            errors.push(ValidationError::ContainsColon {
                field: "auth.default_token",
            });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(ValidationError::NotStringOrNull {
                field: "auth.default_token",
            });
            None
        }
    };

    if let Some(keys) = unknown_keys(auth, AUTH_KEYS) {
        errors.push(ValidationError::UnknownKeys {
            section: "auth",
            keys,
        });
    }

    if let Some(errors) = ValidationErrors::new(errors) {
        return Err(errors);
    }

    Ok(Config {
        auth: AuthConfig {
            token_file: token_file.unwrap_or_default().to_string(),
            token_type: token_type.unwrap_or_default().to_string(),
            default_token,
        },
    })
}

/// Validates a raw value and reports `(is_valid, errors)`.
///
/// This is the report form of [`validate`], used by `config validate`.
#[must_use]
pub fn validate_report(value: &Value) -> (bool, Vec<ValidationError>) {
    match validate(value) {
        Ok(_) => (true, Vec::new()),
        Err(errors) => (false, errors.into_iter().collect()),
    }
}

fn unknown_keys(map: &Map<String, Value>, allowed: &[&str]) -> Option<Vec<String>> {
    let mut extra: Vec<String> = map
        .keys()
        .filter(|k| !allowed.contains(&k.as_str()))
        .cloned()
        .collect();
    extra.sort();
    (!extra.is_empty()).then_some(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "auth": {
                "token_file": "/t",
                "token_type": "Bearer",
                "default_token": null
            }
        })
    }

    #[test]
    fn valid_config_builds_record() {
        let config = validate(&valid()).unwrap();
        assert_eq!(config.auth.token_file, "/t");
        assert_eq!(config.auth.token_type, "Bearer");
        assert!(config.auth.default_token.is_none());
    }

    #[test]
    fn default_token_may_be_absent() {
        let config = validate(&json!({
            "auth": { "token_file": "/t", "token_type": "" }
        }))
        .unwrap();
        assert!(config.auth.default_token.is_none());
        assert_eq!(config.auth.token_type, "");
    }

    #[test]
    fn missing_auth_short_circuits() {
        let errors = validate(&json!({ "extra": 1 })).unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::MissingAuth]);
    }

    #[test]
    fn auth_wrong_type_short_circuits() {
        let errors = validate(&json!({ "auth": "nope" })).unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::MissingAuth]);
    }

    #[test]
    fn non_object_root_short_circuits() {
        let errors = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.as_slice(), &[ValidationError::MissingAuth]);
    }

    #[test]
    fn unknown_top_level_key() {
        let mut value = valid();
        value["extra"] = json!(1);

        let (ok, errors) = validate_report(&value);
        assert!(!ok);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("extra"));
    }

    #[test]
    fn unknown_auth_keys_are_sorted() {
        let mut value = valid();
        value["auth"]["zeta"] = json!(true);
        value["auth"]["alpha"] = json!(true);

        let errors = validate(&value).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::UnknownKeys {
                section: "auth",
                keys: vec!["alpha".to_string(), "zeta".to_string()],
            }]
        );
    }

    #[test]
    fn blank_token_file_rejected() {
        let mut value = valid();
        value["auth"]["token_file"] = json!("   ");
        let errors = validate(&value).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::EmptyString {
                field: "auth.token_file"
            }]
        );
    }

    #[test]
    fn default_token_with_colon_rejected() {
        let mut value = valid();
        value["auth"]["default_token"] = json!("a:b");
        let errors = validate(&value).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[ValidationError::ContainsColon {
                field: "auth.default_token"
            }]
        );
    }

    #[test]
    fn accumulates_every_error_in_order() {
        let value = json!({
            "auth": {
                "token_file": 42,
                "token_type": null,
                "default_token": 7,
                "bogus": 1
            },
            "other": {}
        });

        let errors = validate(&value).unwrap_err();
        assert_eq!(
            errors.as_slice(),
            &[
                ValidationError::UnknownKeys {
                    section: "top level",
                    keys: vec!["other".to_string()],
                },
                ValidationError::EmptyString {
                    field: "auth.token_file"
                },
                ValidationError::NotAString {
                    field: "auth.token_type"
                },
                ValidationError::NotStringOrNull {
                    field: "auth.default_token"
                },
                ValidationError::UnknownKeys {
                    section: "auth",
                    keys: vec!["bogus".to_string()],
                },
            ]
        );
    }

    #[test]
    fn errors_display_joined() {
        let errors = validate(&json!({ "auth": { "token_type": "" } })).unwrap_err();
        assert_eq!(
            errors.to_string(),
            "'auth.token_file' must be a non-empty string"
        );
    }

    #[test]
    fn new_rejects_empty_list() {
        assert!(ValidationErrors::new(Vec::new()).is_none());
    }
}
