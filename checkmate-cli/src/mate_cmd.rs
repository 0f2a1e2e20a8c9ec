//! Mate command - run the checkmate search on a position file
//!
//! Legality of candidate moves is judged by `StandardRules` over the loaded
//! board.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use checkmate_core::{MateSearch, MateSearchConfig, Player, StandardRules, Verdict};

use crate::check_cmd::load_position;

#[derive(Args)]
pub struct MateArgs {
    /// Position JSON file
    #[arg(long, value_name = "FILE")]
    pub position: PathBuf,

    /// Side whose king is examined (defaults to the side to move)
    #[arg(long)]
    pub player: Option<Player>,

    /// Evaluate candidate moves in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Only block lines; never try capturing a checking knight, pawn or king
    #[arg(long)]
    pub no_leaper_captures: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct MateReport<'a> {
    position: &'a str,
    player: Player,
    verdict: Verdict,
    elapsed_us: u128,
}

pub fn run(args: MateArgs) -> Result<()> {
    let (position, board) = load_position(&args.position)?;
    let player = args.player.unwrap_or(position.to_move);

    let config = MateSearchConfig::default()
        .with_parallel(args.parallel)
        .with_leaper_captures(!args.no_leaper_captures);
    let search = MateSearch::new(config);
    let rules = StandardRules::new(board);

    tracing::info!("Searching {} for {} (parallel={})", position.name, player, args.parallel);

    let start = Instant::now();
    let verdict = search
        .evaluate(&board, player, &rules)
        .with_context(|| format!("Checkmate search failed for {}", position.name))?;
    let elapsed = start.elapsed();

    let report = MateReport {
        position: &position.name,
        player,
        verdict,
        elapsed_us: elapsed.as_micros(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match verdict {
        Verdict::NotInCheck => println!("{} is not in check", player),
        Verdict::Escapable(escape) => {
            println!("{} is in check but escapes: {} ({:?})", player, escape.mv, escape.kind)
        }
        Verdict::Checkmate => println!("{} is checkmated", player),
    }

    Ok(())
}
