//! Poker Ledger - Command-line front end
//!
//! Replays action scripts against a session and prints pot, phase,
//! per-player summaries and the settlement plan.

mod cli;
mod report;
mod script;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use poker_ledger_core::session::{RoomCode, RoomCodeGenerator};
use poker_ledger_core::{SessionConfig, SessionController};
use std::fs;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            script,
            config,
            strict,
            json,
        } => run_script(&script, config.as_deref(), strict, json),
        Command::RoomCode { seed, length } => print_room_code(seed, length),
    }
}

/// Replay a script and print the outcome
fn run_script(script_path: &Path, config_path: Option<&Path>, strict: bool, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            SessionConfig::from_json(&raw)
                .with_context(|| format!("Invalid config {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    let raw = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script {}", script_path.display()))?;
    let script = script::Script::from_json(&raw)?;

    let mut session = SessionController::new(config)?;
    info!(room_code = %session.room_code(), actions = script.actions.len(), "Replaying script");

    let rejections = script::replay(&mut session, &script, strict)?;
    let report = report::Report::build(&session, &rejections);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}

fn print_room_code(seed: Option<u64>, length: usize) -> Result<()> {
    // Reuse config validation for the length bounds
    SessionConfig {
        room_code_length: length,
        ..SessionConfig::default()
    }
    .validate()?;

    let mut generator = match seed {
        Some(seed) => RoomCodeGenerator::new(seed),
        None => RoomCodeGenerator::from_entropy(),
    };
    println!("{}", RoomCode::generate(&mut generator, length));
    Ok(())
}
