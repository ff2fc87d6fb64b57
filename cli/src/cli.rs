//! Command-line interface for poker-ledger.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Poker Ledger - buy-in / cash-out bookkeeping and settlement
#[derive(Parser, Debug)]
#[command(name = "poker-ledger")]
#[command(about = "Track a poker session and work out who pays whom", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a JSON action script and print the session outcome
    Run {
        /// Path to the action script
        script: PathBuf,

        /// Path to a JSON session config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Fail on the first rejected action instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a fresh room code
    RoomCode {
        /// Seed for a reproducible code
        #[arg(long)]
        seed: Option<u64>,

        /// Number of characters
        #[arg(long, default_value = "6")]
        length: usize,
    },
}
