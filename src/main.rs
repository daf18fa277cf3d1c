//! ReachBridge - outreach command relay and browser DOM-automation bridge.
//!
//! Entry point for the `reachbridge` CLI: channel server, browser agent,
//! and orchestrating caller subcommands.

use std::path::Path;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use reachbridge_config::ConfigLoader;

mod cli;
mod commands;
mod ledger;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout is reserved for machine-parseable output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = ConfigLoader::expand_path(&cli.config);
    let config = ConfigLoader::load(Path::new(&config_path))?;
    debug!(path = %config_path, "configuration loaded");

    match cli.command {
        Commands::Serve { host, port } => commands::run_serve(config, host, port).await,
        Commands::Agent => commands::run_agent(config).await,
        Commands::Send { action } => {
            let code = commands::run_send(config, action).await?;
            std::process::exit(code);
        }
        Commands::Status => commands::run_status(config).await,
    }
}
