//! Lorekeeper CLI entry point.
//!
//! Binary name: `lore`
//!
//! Parses CLI arguments, loads the data directory and configuration, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use std::path::PathBuf;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use lorekeeper_infra::filesystem::resolve_data_dir;
use lorekeeper_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,lorekeeper_core=debug,lorekeeper_infra=debug",
        _ => "trace",
    };
    let options = TracingOptions::new(filter)
        .with_json(cli.log_json)
        .with_otel(cli.otel);
    if let Err(e) = init_tracing(&options) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "lore", &mut std::io::stdout());
        return Ok(());
    }

    let result = execute(cli, resolve_data_dir()).await;

    shutdown_tracing();
    result
}

/// Build application state and dispatch the command. Every failure comes back
/// as the result so the caller can flush tracing before exiting.
async fn execute(cli: Cli, data_dir: PathBuf) -> anyhow::Result<()> {
    let state = AppState::from_data_dir(data_dir).await?;

    match cli.command {
        Commands::Skill { action } => cli::skill::run(&state, action, cli.json).await,
        Commands::Graph { action } => cli::graph::run(&state, action, cli.json).await,
        Commands::Dialog { action } => cli::dialog::run(&state, action, cli.json).await,
        Commands::Completions { .. } => Ok(()),
    }
}
