//! Console output helpers.
//!
//! Status lines go to stdout; errors and warnings go to stderr.

use colored::Colorize;
use rcurl_config::{ConfigError, ErrorKind, ValidationErrors};
use rcurl_tokens::TokenError;

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green().bold(), message.as_ref().green());
}

pub fn info(message: impl AsRef<str>) {
    println!("{} {}", "→".cyan(), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.as_ref().yellow());
}

pub fn heading(title: impl AsRef<str>) {
    println!("{}", title.as_ref().yellow().bold());
}

/// Prints a `label : value` row under a heading.
pub fn field(label: &str, value: impl AsRef<str>) {
    println!("    {:<14}: {}", label.cyan(), value.as_ref());
}

/// Prints one line per validation error.
pub fn validation_errors(errors: &ValidationErrors) {
    for err in errors {
        eprintln!("  {} {err}", "-".red());
    }
}

/// Prints a command failure with its cause chain and a remediation hint.
pub fn report_error(err: &anyhow::Error) {
    eprintln!("{} {err}", "error:".red().bold());
    for cause in err.chain().skip(1) {
        eprintln!("  {} {cause}", "caused by:".dimmed());
    }

    let config_err = err.downcast_ref::<ConfigError>();
    if let Some(errors) = config_err.and_then(ConfigError::validation_errors) {
        validation_errors(errors);
    }

    let kind = config_err
        .map(ConfigError::kind)
        .or_else(|| err.downcast_ref::<TokenError>().map(TokenError::kind));
    if let Some(hint) = kind.and_then(|kind| hint(kind, config_err)) {
        eprintln!("\n{} {hint}", "hint:".yellow());
    }
}

fn hint(kind: ErrorKind, err: Option<&ConfigError>) -> Option<String> {
    let hint = match (kind, err) {
        (_, Some(ConfigError::NothingToModify)) => {
            format!("run {} to create one", "`rcurl config generate`".cyan())
        }
        (ErrorKind::NotFound, Some(ConfigError::NotFound { .. })) => {
            format!("run {} to create a config", "`rcurl init`".cyan())
        }
        (ErrorKind::NotFound, Some(ConfigError::Token(TokenError::DefaultNotSet))) => format!(
            "set one with {}",
            "`rcurl config set auth.default_token <alias>`".cyan()
        ),
        (ErrorKind::NotFound, _) => {
            format!("run {} to see stored aliases", "`rcurl token list`".cyan())
        }
        (ErrorKind::InvalidFormat, Some(ConfigError::Token(_)) | None) => {
            "fix the token file by hand; every data line must read `alias:token`".to_string()
        }
        (ErrorKind::InvalidFormat, Some(_)) => format!(
            "run {} to check every problem, or {} to start over",
            "`rcurl config validate`".cyan(),
            "`rcurl config generate --reset`".cyan()
        ),
        (ErrorKind::Conflict, _) => {
            format!("see {}", "`rcurl config generate --help`".cyan())
        }
        (ErrorKind::Io, _) => return None,
    };
    Some(hint)
}
