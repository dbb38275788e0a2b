use anyhow::Result;
use clap::{Args, Subcommand};
use rcurl_config::auth::{AUTHORIZATION, load_saved_token};

use super::Context;

#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommands,
}

#[derive(Subcommand)]
enum AuthSubcommands {
    /// Print the Authorization header a request with this alias would send
    Header {
        /// Token alias, or `default`
        alias: String,
    },
}

impl AuthCommand {
    pub fn execute(self, ctx: &Context) -> Result<()> {
        match self.command {
            AuthSubcommands::Header { alias } => {
                let saved = load_saved_token(&ctx.paths.config_path, &alias)?;
                println!("{AUTHORIZATION}: {}", saved.authorization());
                Ok(())
            }
        }
    }
}
