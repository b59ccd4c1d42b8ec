//! Plan one turn from the command line and print the moves.
//!
//! Field rows are separated by `;` and cells by `,`, top row first, using
//! cell codes 0 (empty), 1 (falling piece), 2 (block) and 3 (solid).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tandem::engine::t_spin_potential;
use tandem::eval::EvalWeights;
use tandem::{Board, Move, Piece, TurnPlanner, TurnState};

#[derive(Parser, Debug)]
#[command(name = "plan_turn")]
struct Args {
    /// Field columns.
    #[arg(long, default_value_t = 10)]
    width: usize,

    /// Field rows.
    #[arg(long, default_value_t = 20)]
    height: usize,

    /// Field text, e.g. "0,0,1,1,0;...".
    #[arg(long)]
    field: String,

    /// Falling piece letter.
    #[arg(long)]
    piece: Piece,

    /// Anchor of the falling piece as `x,y`; y may be negative.
    #[arg(long, value_parser = parse_location, allow_hyphen_values = true)]
    location: (i8, i8),

    /// Next piece letter.
    #[arg(long)]
    next: Piece,

    /// Skips still available.
    #[arg(long, default_value_t = 0)]
    skips: u32,

    /// JSON file of evaluator weights; missing fields keep their defaults.
    #[arg(long, value_name = "path")]
    weights: Option<PathBuf>,

    /// Also report the deepest T-spin the settled field allows.
    #[arg(long)]
    probe: bool,
}

fn parse_location(raw: &str) -> Result<(i8, i8), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {raw:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok((x, y))
}

fn load_weights(path: &Path) -> Result<EvalWeights> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading weights from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing weights in {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let board = Board::parse(args.width, args.height, &args.field).context("parsing field")?;
    let planner = match &args.weights {
        Some(path) => TurnPlanner::with_weights(load_weights(path)?),
        None => TurnPlanner::new(),
    };

    if args.probe {
        let mut settled = board.clone();
        settled.clear_piece_markings();
        match t_spin_potential(&settled) {
            Some(rows) => info!("t-spin available, up to {rows} rows"),
            None => info!("no t-spin available"),
        }
    }

    let state = TurnState::new(board, args.piece, args.location, args.next).with_skips(args.skips);
    let decision = planner
        .plan(&state)
        .with_context(|| format!("planning {} at {:?}", args.piece, args.location))?;

    let moves: Vec<String> = decision.moves().iter().map(Move::to_string).collect();
    println!("{}", moves.join(","));
    Ok(())
}
