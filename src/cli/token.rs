//! `rcurl token`: list, store, and remove token aliases.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;
use rcurl_config::{Config, Prompter};
use rcurl_tokens::{DEFAULT_ALIAS, SetOutcome, TokenError, TokenFile};

use super::Context;
use crate::output;
use crate::prompt::TerminalPrompter;

#[derive(Args)]
pub struct TokenCommand {
    #[command(subcommand)]
    command: TokenSubcommands,
}

#[derive(Subcommand)]
enum TokenSubcommands {
    /// List every alias, or show one (`default` follows the configured default)
    List {
        /// Alias to show
        alias: Option<String>,
    },

    /// Store a token under an alias, replacing any previous value
    Set {
        /// The token
        token: String,

        /// Alias to store it under
        #[arg(short, long)]
        alias: String,
    },

    /// Remove one alias, or all of them
    Remove {
        /// Alias to remove (`default` follows the configured default)
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        alias: Option<String>,

        /// Remove every alias, keeping comments
        #[arg(short, long)]
        all: bool,

        /// Skip the confirmation for --all
        #[arg(short, long)]
        yes: bool,
    },
}

impl TokenCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        let config = Config::load_from(&ctx.paths.config_path)?;
        match self.command {
            TokenSubcommands::List { alias } => list(&config, alias.as_deref()),
            TokenSubcommands::Set { token, alias } => set(&config, &alias, &token),
            TokenSubcommands::Remove { alias, all, yes } => match alias {
                _ if all => remove_all(&config, yes),
                Some(alias) => remove(&config, &alias),
                None => bail!("give an alias to remove, or use --all"),
            },
        }
    }
}

fn list(config: &Config, alias: Option<&str>) -> Result<()> {
    let file = TokenFile::load(config.token_path())?;
    let default = config.default_alias();

    if let Some(alias) = alias {
        let token = file.resolve(alias, default)?;
        let label = match (alias, default) {
            (DEFAULT_ALIAS, Some(target)) => format!("{alias} ({target})"),
            _ => alias.to_string(),
        };
        println!("{} : {token}", label.bold());
        return Ok(());
    }

    if file.is_empty() {
        output::info(format!(
            "No tokens stored in {}",
            config.token_path().display()
        ));
        return Ok(());
    }

    let width = file
        .iter()
        .map(|(alias, _)| alias.len())
        .max()
        .unwrap_or_default()
        .max("Alias".len());
    println!("{:<width$}  {}", "Alias".bold(), "Token".bold());
    for (alias, token) in file.iter() {
        let marker = if Some(alias) == default {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{:<width$}  {token}{marker}", alias.cyan());
    }
    Ok(())
}

fn set(config: &Config, alias: &str, token: &str) -> Result<()> {
    let path = config.token_path();
    if !path.exists() {
        output::warn(format!(
            "token file not found at {}, creating it",
            path.display()
        ));
    }

    match rcurl_tokens::set_alias(&path, alias, token)? {
        SetOutcome::Added => output::success(format!("Token '{alias}' set in {}", path.display())),
        SetOutcome::Updated => {
            output::success(format!("Token '{alias}' updated in {}", path.display()));
        }
        SetOutcome::Unchanged => output::info(format!("Token '{alias}' already up to date")),
    }
    Ok(())
}

fn remove(config: &Config, alias: &str) -> Result<()> {
    let default = config.default_alias();
    let removed = rcurl_tokens::remove_alias(&config.token_path(), alias, default)?;
    output::success(format!("Token '{removed}' removed"));
    if Some(removed.as_str()) == default {
        output::warn(format!(
            "'{removed}' was the default alias; set a new one with `rcurl config set auth.default_token <ALIAS>`"
        ));
    }
    Ok(())
}

fn remove_all(config: &Config, yes: bool) -> Result<()> {
    let path = config.token_path();
    if !path.exists() {
        return Err(TokenError::NotFound { path }.into());
    }

    let confirmed = yes
        || TerminalPrompter::default()
            .confirm("Are you sure you want to delete ALL tokens?", false)?;
    if !confirmed {
        output::info("Operation cancelled");
        return Ok(());
    }

    let removed = rcurl_tokens::remove_all(&path)?;
    output::success(format!("Removed {removed} token(s)"));
    Ok(())
}
