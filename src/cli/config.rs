//! `rcurl config`: show, check, and change the configuration file.

use anyhow::{Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use rcurl_config::generate::{Generation, prepare};
use rcurl_config::persistence::{load, set_key, to_json_string};
use rcurl_config::validation::validate_report;
use rcurl_config::{Config, GenerateOptions, Prompter};
use serde_json::Value;

use super::Context;
use crate::output;
use crate::prompt::TerminalPrompter;

#[derive(Args)]
pub struct ConfigCommand {
    /// Defaults to `show` when omitted
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Display the current configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },

    /// Check the configuration file and list every problem
    Validate,

    /// Print one value, e.g. `auth.token_type`
    Get {
        /// Dotted key
        key: String,
    },

    /// Change one value and rewrite the file
    ///
    /// An omitted value clears the key; for `auth.default_token` that
    /// means no default alias.
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: Option<String>,
    },

    /// Create, modify, overwrite, or reset the configuration file
    Generate(GenerateArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Human,
    Json,
}

#[derive(Args)]
struct GenerateArgs {
    /// Replace the configuration with a fresh one
    #[arg(short, long)]
    reset: bool,

    /// Edit the existing configuration interactively
    #[arg(short, long)]
    modify: bool,

    /// Replace an existing configuration
    #[arg(short, long)]
    overwrite: bool,

    /// Answer prompts instead of using defaults
    #[arg(short, long)]
    interactive: bool,

    /// Only display the current configuration
    #[arg(short, long)]
    show: bool,

    /// Copy the existing file into `backup/` first
    #[arg(short, long)]
    backup: bool,

    /// Preview the result and ask before writing (create and modify only)
    #[arg(long)]
    dry_run: bool,
}

impl From<&GenerateArgs> for GenerateOptions {
    fn from(args: &GenerateArgs) -> Self {
        Self {
            reset: args.reset,
            modify: args.modify,
            overwrite: args.overwrite,
            interactive: args.interactive,
            dry_run: args.dry_run,
            backup: args.backup,
            show: args.show,
        }
    }
}

impl ConfigCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Show { format }) => show(ctx, format),
            None => show(ctx, Format::Human),
            Some(ConfigSubcommands::Validate) => validate(ctx),
            Some(ConfigSubcommands::Get { key }) => get(ctx, &key),
            Some(ConfigSubcommands::Set { key, value }) => {
                set(ctx, &key, value.as_deref().unwrap_or_default())
            }
            Some(ConfigSubcommands::Generate(args)) => generate(ctx, &args),
        }
    }
}

fn show(ctx: &Context, format: Format) -> Result<()> {
    let config = Config::load_from(&ctx.paths.config_path)?;
    match format {
        Format::Json => println!("{}", to_json_string(&config)?),
        Format::Human => print_human(&config),
    }
    Ok(())
}

fn print_human(config: &Config) {
    output::heading("rcurl config");
    output::field("Token File", &config.auth.token_file);
    output::field("Token Type", &config.auth.token_type);
    output::field(
        "Default Token",
        config.default_alias().unwrap_or("(not set)"),
    );
}

fn validate(ctx: &Context) -> Result<()> {
    let path = &ctx.paths.config_path;
    let raw = load(path)?;
    let (valid, errors) = validate_report(&raw);
    if valid {
        output::success(format!("Configuration at {} is valid", path.display()));
        return Ok(());
    }

    output::heading("Configuration is invalid");
    for err in &errors {
        println!("  {} {err}", "-".red());
    }
    println!(
        "\nFix the file by hand, or run {} to start over",
        "`rcurl config generate --reset`".cyan()
    );
    bail!(
        "{} validation error(s) in {}",
        errors.len(),
        path.display()
    )
}

fn get(ctx: &Context, key: &str) -> Result<()> {
    let config = Config::load_from(&ctx.paths.config_path)?;
    let value = match config.get(key)? {
        Value::String(s) => s,
        other => serde_json::to_string_pretty(&other)?,
    };
    println!("{} = {value}", key.cyan());
    Ok(())
}

fn set(ctx: &Context, key: &str, value: &str) -> Result<()> {
    let config = set_key(&ctx.paths.config_path, key, value)?;
    let stored = config.get(key)?;
    output::success(format!("Set {key} = {stored}"));
    Ok(())
}

fn generate(ctx: &Context, args: &GenerateArgs) -> Result<()> {
    let options = GenerateOptions::from(args);
    let mut prompter = TerminalPrompter::default();
    let config_path = &ctx.paths.config_path;

    let mut plan = match prepare(config_path, &ctx.paths.token_path, &options, &mut prompter)? {
        Generation::Show(config) => {
            output::heading("Current config:");
            println!("{}", to_json_string(&config)?);
            return Ok(());
        }
        Generation::Plan(plan) => plan,
    };

    // a dry run keeps its backup even when the write is cancelled
    let early_backup = if plan.dry_run {
        plan.take_backup(config_path)?
    } else {
        None
    };
    if let Some(backup) = &early_backup {
        output::success(format!("Backup created at {}", backup.display()));
    }

    if plan.dry_run {
        output::heading(format!("DRY RUN: {}", plan.mode));
        println!("{}", to_json_string(&plan.config)?);
        if !prompter.confirm("Proceed with writing to disk?", true)? {
            println!("{}", "Operation cancelled.".red());
            return Ok(());
        }
    }

    let committed = plan.commit(config_path)?;
    if let Some(backup) = committed.backup_path.as_ref().filter(|_| early_backup.is_none()) {
        output::success(format!("Backup created at {}", backup.display()));
    }
    output::success(format!("Successfully executed {} mode", committed.mode));
    Ok(())
}
