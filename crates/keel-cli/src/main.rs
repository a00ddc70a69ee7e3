//! Keel CLI - Personal finance dashboard
//!
//! Usage:
//!   keel setup               Walk through the setup wizard
//!   keel dashboard           Show derived metrics
//!   keel set cash 15000      Edit a single field
//!   keel analyze             Request AI commentary
//!   keel reset               Clear the snapshot

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Setup => commands::cmd_setup(cli.data.as_deref()),
        Commands::Dashboard => commands::cmd_dashboard(cli.data.as_deref()),
        Commands::Set { field, value } => commands::cmd_set(cli.data.as_deref(), &field, &value),
        Commands::Analyze { model } => {
            commands::cmd_analyze(cli.data.as_deref(), model.as_deref()).await
        }
        Commands::Status => commands::cmd_status(cli.data.as_deref()),
        Commands::Reset { yes } => commands::cmd_reset(cli.data.as_deref(), yes),
    }
}
