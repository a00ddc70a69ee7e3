//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keel - A single-slot personal finance dashboard
#[derive(Parser)]
#[command(name = "keel")]
#[command(about = "Personal finance dashboard with optional AI commentary", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Snapshot file path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the setup wizard (landing -> philosophy -> setup -> dashboard)
    Setup,

    /// Show the dashboard with all derived metrics
    Dashboard,

    /// Set a single profile field
    Set {
        /// Field name in kebab-case (e.g. cash-floor, income-frequency)
        field: String,
        /// New value ("true"/"false" for has-equity)
        value: String,
    },

    /// Request AI commentary on the current numbers
    Analyze {
        /// Override the model configured via KEEL_ANALYSIS_MODEL
        #[arg(long)]
        model: Option<String>,
    },

    /// Show snapshot location and session state
    Status,

    /// Clear the stored snapshot and start over
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
