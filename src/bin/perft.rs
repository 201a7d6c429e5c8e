//! Perft node counter.
//!
//! Usage:
//! `cargo run --release --bin perft -- --depth 6`
//! `cargo run --release --bin perft -- --position "W:WK46,28:B12,17" --depth 5 --threads 8`

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_draughts::game_state::draughts_rules::STARTING_POSITION_WHITE_FIRST;
use plum_draughts::move_generation::perft::{perft_multi_threaded, perft_single_thread};
use plum_draughts::utils::position_notation::parse_position;

/// Count the leaf nodes of the legal-move tree of a draughts position.
#[derive(Debug, Parser)]
#[command(name = "perft", version)]
struct Args {
    /// Position notation, e.g. "W:W31-50:B1-20".
    #[arg(long, alias = "fen", default_value = STARTING_POSITION_WHITE_FIRST)]
    position: String,

    /// Depth in plies.
    #[arg(short, long, default_value_t = 5)]
    depth: u8,

    /// Worker threads; 1 counts on the calling thread.
    #[arg(short, long, default_value_t = 1)]
    threads: usize,

    /// Print the board before counting.
    #[arg(long)]
    show: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let position = parse_position(&args.position)
        .with_context(|| format!("cannot read position '{}'", args.position))?;

    if args.show {
        println!("{position}");
    }

    info!(position = ?position, depth = args.depth, threads = args.threads, "counting");
    let started = Instant::now();
    let counts = if args.threads > 1 {
        perft_multi_threaded(&position, args.depth, args.threads)?
    } else {
        perft_single_thread(&position, args.depth)
    };
    let elapsed = started.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        (counts.nodes as f64 / elapsed.as_secs_f64()) as u64
    } else {
        0
    };
    println!(
        "depth={} nodes={} captures={} pieces_captured={} promotions={} elapsed_ms={} nps={}",
        args.depth,
        counts.nodes,
        counts.captures,
        counts.pieces_captured,
        counts.promotions,
        elapsed.as_millis(),
        nps
    );

    Ok(())
}
