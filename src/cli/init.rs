use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use rcurl_config::init::initialize;

use super::Context;
use crate::output;

#[derive(Args)]
pub struct InitCommand {
    /// Where to keep the token file
    #[arg(short, long, value_name = "FILE")]
    token_file: Option<PathBuf>,

    /// Replace existing configuration and token files
    #[arg(short, long)]
    overwrite: bool,
}

impl InitCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        if self.overwrite {
            output::warn("overwrite enabled: existing files will be replaced");
        }

        let report = initialize(&ctx.paths, self.token_file.as_deref(), self.overwrite)?;
        let config_path = ctx.paths.config_path.display();

        if report.config_created {
            output::success(format!("Created configuration file at {config_path}"));
        } else {
            output::info(format!("Configuration file already exists at {config_path}"));
        }
        if report.token_file_created {
            output::success(format!(
                "Created token file at {}",
                report.token_path.display()
            ));
        } else {
            output::info(format!(
                "Token file already exists at {}",
                report.token_path.display()
            ));
        }

        if report.already_initialized() {
            println!("\nrcurl already initialized");
        }
        println!("\n{}", "Next steps:".yellow());
        println!("  - Store a token with {}", "`rcurl token set <TOKEN> -a <ALIAS>`".cyan());
        println!(
            "  - Make it the default with {}",
            "`rcurl config set auth.default_token <ALIAS>`".cyan()
        );
        Ok(())
    }
}
