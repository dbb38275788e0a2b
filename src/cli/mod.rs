//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and an
//! `execute` method taking the shared [`Context`].

mod auth;
mod config;
mod init;
mod token;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rcurl_config::Paths;
use rcurl_config::paths::{default_paths, home_dir};
use tracing::debug;

/// A lightweight curl-like HTTP client: configuration and token management.
#[derive(Parser)]
#[command(name = "rcurl", version, about, long_about = None)]
pub struct Cli {
    /// Home directory holding `.rcurl/`
    #[arg(long, global = true, env = "RCURL_HOME", value_name = "DIR")]
    home: Option<PathBuf>,

    /// Configuration file to use instead of `<home>/.rcurl/config.json`
    #[arg(long, global = true, env = "RCURL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the configuration and token files
    Init(init::InitCommand),

    /// Show, check, and change the configuration
    Config(config::ConfigCommand),

    /// Manage stored token aliases
    Token(token::TokenCommand),

    /// Inspect the credentials a request would send
    Auth(auth::AuthCommand),

    /// Print the version
    Version,
}

/// Locations shared by every command.
pub struct Context {
    pub paths: Paths,
}

impl Context {
    fn new(home: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let home = match home {
            Some(home) => home,
            None => home_dir()?,
        };
        let mut paths = default_paths(&home);
        if let Some(config) = config {
            paths.config_path = config;
        }
        debug!(config = %paths.config_path.display(), "resolved paths");
        Ok(Self { paths })
    }
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        if let Commands::Version = self.command {
            println!("rcurl {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }

        let ctx = Context::new(self.home, self.config)?;
        match self.command {
            Commands::Init(cmd) => cmd.execute(&ctx),
            Commands::Config(cmd) => cmd.execute(&ctx),
            Commands::Token(cmd) => cmd.execute(&ctx),
            Commands::Auth(cmd) => cmd.execute(&ctx),
            Commands::Version => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_override_replaces_default() {
        let ctx = Context::new(
            Some(PathBuf::from("/h")),
            Some(PathBuf::from("/elsewhere/c.json")),
        )
        .unwrap();
        assert_eq!(ctx.paths.config_path, PathBuf::from("/elsewhere/c.json"));
        assert_eq!(ctx.paths.token_path, PathBuf::from("/h/.rcurl/tokens"));
    }
}
