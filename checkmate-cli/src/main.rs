//! Checkmate CLI - Command-line interface
//!
//! Commands:
//! - check: Report whether the side to move is in check, and from where
//! - probe: Report check status after a hypothetical move
//! - mate: Run the checkmate search

mod check_cmd;
mod mate_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "checkmate")]
#[command(about = "Check and checkmate detection for chess positions")]
struct Cli {
    /// Log search details (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Is the king in check
    Check(check_cmd::CheckArgs),
    /// Is the king in check after a move
    Probe(check_cmd::ProbeArgs),
    /// Is the king checkmated
    Mate(mate_cmd::MateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => check_cmd::run_check(args),
        Commands::Probe(args) => check_cmd::run_probe(args),
        Commands::Mate(args) => mate_cmd::run(args),
    }
}
