//! Interactive configuration wizard.
//!
//! The wizard is written against the [`Prompter`] trait so that the core
//! never touches a terminal. The binary supplies a terminal implementation;
//! tests supply scripted answers.

use std::io;
use std::path::Path;

use tracing::debug;

use crate::config::{Config, DEFAULT_TOKEN_TYPE};
use crate::error::{ConfigError, Result};
use crate::paths::{expand_path, resolve_path};
use crate::validation::validate;

/// How many rejected answers a single prompt tolerates.
pub const MAX_PROMPT_ATTEMPTS: usize = 3;

/// A source of answers to questions.
pub trait Prompter {
    /// Asks for a line of text. An empty answer means "take the default".
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input fails.
    fn input(&mut self, label: &str, default: Option<&str>) -> io::Result<String>;

    /// Asks a yes/no question.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying input fails.
    fn confirm(&mut self, label: &str, default: bool) -> io::Result<bool>;

    /// Reports that the last answer was rejected.
    fn reject(&mut self, _message: &str) {}
}

/// Prompts until `validator` accepts an answer.
///
/// An empty answer is replaced by `default` when there is one. A validator
/// returns `Err(message)` to reject; the message is shown before the next
/// attempt.
///
/// # Errors
///
/// Returns [`ConfigError::Prompt`] if the prompter fails and
/// [`ConfigError::PromptExhausted`] after [`MAX_PROMPT_ATTEMPTS`] rejections.
pub fn prompt_text<P, F>(
    prompter: &mut P,
    label: &str,
    default: Option<&str>,
    validator: F,
) -> Result<String>
where
    P: Prompter + ?Sized,
    F: Fn(&str) -> std::result::Result<(), String>,
{
    for attempt in 1..=MAX_PROMPT_ATTEMPTS {
        let answer = prompter
            .input(label, default)
            .map_err(ConfigError::Prompt)?;
        let answer = match (answer.trim(), default) {
            ("", Some(default)) => default.to_string(),
            (trimmed, _) => trimmed.to_string(),
        };

        match validator(&answer) {
            Ok(()) => return Ok(answer),
            Err(message) => {
                debug!(label, attempt, "answer rejected");
                prompter.reject(&message);
            }
        }
    }

    Err(ConfigError::PromptExhausted {
        label: label.to_string(),
        attempts: MAX_PROMPT_ATTEMPTS,
    })
}

/// Accepts a path whose parent directory exists.
///
/// # Errors
///
/// Returns a user-facing message for an empty path or a missing parent.
pub fn parent_dir_exists(raw: &str) -> std::result::Result<(), String> {
    if raw.trim().is_empty() {
        return Err("Path cannot be empty.".to_string());
    }
    let path = expand_path(raw.trim());
    match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() || parent.is_dir() => Ok(()),
        None => Ok(()),
        Some(_) => Err("Invalid path: parent directory must exist.".to_string()),
    }
}

fn no_colon(raw: &str) -> std::result::Result<(), String> {
    if raw.contains(':') {
        Err("Alias cannot contain ':'.".to_string())
    } else {
        Ok(())
    }
}

/// Builds a configuration record from the user's answers.
///
/// When `existing` is given its values pre-fill every prompt; otherwise the
/// defaults are `default_token_file`, `Bearer`, and no default alias. The
/// chosen token file path is stored absolute, and the result is validated
/// before it is returned.
///
/// # Errors
///
/// Returns a prompt error, or [`ConfigError::Validation`] if the answers do
/// not form a valid record.
pub fn run_wizard<P>(
    prompter: &mut P,
    existing: Option<&Config>,
    default_token_file: &Path,
) -> Result<Config>
where
    P: Prompter + ?Sized,
{
    let default_path = existing.map_or_else(
        || default_token_file.to_string_lossy().into_owned(),
        |c| c.token_path().to_string_lossy().into_owned(),
    );
    let default_type = existing.map_or(DEFAULT_TOKEN_TYPE, |c| c.auth.token_type.as_str());
    let default_alias = existing.and_then(Config::default_alias);

    let token_file = prompt_text(
        prompter,
        "Token file path",
        Some(&default_path),
        parent_dir_exists,
    )?;
    let token_type = prompt_text(prompter, "Token type", Some(default_type), |_| Ok(()))?;
    let alias = prompt_text(prompter, "Default token alias", default_alias, no_colon)?;

    let raw = serde_json::json!({
        "auth": {
            "token_file": resolve_path(&token_file).to_string_lossy(),
            "token_type": token_type,
            "default_token": (!alias.is_empty()).then_some(alias),
        }
    });
    Ok(validate(&raw)?)
}
