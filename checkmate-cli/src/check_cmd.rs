//! Check and probe commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use checkmate_core::{is_check_after_move, threats, Board, Geometry, Move, Player, Position, Square};

#[derive(Args)]
pub struct CheckArgs {
    /// Position JSON file
    #[arg(long, value_name = "FILE")]
    pub position: PathBuf,

    /// Side whose king is examined (defaults to the side to move)
    #[arg(long)]
    pub player: Option<Player>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Position JSON file
    #[arg(long, value_name = "FILE")]
    pub position: PathBuf,

    /// Move as fromRow,fromCol,toRow,toCol
    #[arg(long = "move", value_name = "R,C,R,C")]
    pub mv: Move,

    /// Side whose king is examined (defaults to the side to move)
    #[arg(long)]
    pub player: Option<Player>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    position: &'a str,
    player: Player,
    king: Square,
    in_check: bool,
    threats: Vec<Geometry>,
    attackers: Vec<Attacker>,
}

#[derive(Serialize)]
struct Attacker {
    geometry: Geometry,
    square: Square,
}

#[derive(Serialize)]
struct ProbeReport<'a> {
    position: &'a str,
    player: Player,
    mv: Move,
    in_check: bool,
}

/// Load a position file and parse its board
pub fn load_position(path: &Path) -> Result<(Position, Board)> {
    let position = Position::load(path)
        .with_context(|| format!("Failed to load position: {}", path.display()))?;
    let board = position
        .board()
        .with_context(|| format!("Invalid board in {}", path.display()))?;
    Ok((position, board))
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let (position, board) = load_position(&args.position)?;
    let player = args.player.unwrap_or(position.to_move);

    let (king, found) = threats(&board, player)?;
    let threats: Vec<Geometry> = found.iter().collect();
    let attackers: Vec<Attacker> = threats
        .iter()
        .flat_map(|&geometry| {
            geometry
                .attackers(&board, king, player)
                .into_iter()
                .map(move |square| Attacker { geometry, square })
        })
        .collect();

    tracing::info!("{}: {} king on {} attacked via {:?}", position.name, player, king, threats);

    let report = CheckReport {
        position: &position.name,
        player,
        king,
        in_check: !threats.is_empty(),
        threats,
        attackers,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", board);
        if report.in_check {
            println!("{} king on {} is in check", player, king);
            for attacker in &report.attackers {
                println!("  {:?} from {}", attacker.geometry, attacker.square);
            }
        } else {
            println!("{} king on {} is not in check", player, king);
        }
    }

    Ok(())
}

pub fn run_probe(args: ProbeArgs) -> Result<()> {
    let (position, board) = load_position(&args.position)?;
    let player = args.player.unwrap_or(position.to_move);

    let in_check = is_check_after_move(&board, player, args.mv)
        .with_context(|| format!("Cannot evaluate {} in {}", args.mv, position.name))?;

    let report = ProbeReport {
        position: &position.name,
        player,
        mv: args.mv,
        in_check,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if in_check {
        println!("after {} the {} king is in check", args.mv, player);
    } else {
        println!("after {} the {} king is safe", args.mv, player);
    }

    Ok(())
}
