//! rcurl - a lightweight curl-like HTTP client.
//!
//! This binary covers the local state behind requests: the configuration
//! file and the token alias store.
//!
//! - `init` - create `~/.rcurl/config.json` and a token file
//! - `config` - show, validate, get, set, and generate the configuration
//! - `token` - list, set, and remove token aliases
//! - `auth header` - print the credentials for an alias

mod cli;
mod output;
mod prompt;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "RCURL_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = cli.execute() {
        output::report_error(&err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
