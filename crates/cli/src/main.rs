// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker odds command line calculator.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::{io, time::Instant};

use pokerodds_eval::{Board, Config, HandSet, Odds};

mod terminal;

#[derive(Debug, Parser)]
#[clap(name = "pokerodds", about = "Calculating poker odds")]
struct Cli {
    /// Players cards, eg AsKd QhQc.
    hands: Vec<String>,
    /// Board cards, eg 2s3d6d.
    #[clap(long, short, default_value = "")]
    board: String,
    /// Number of preflop simulations to run.
    #[clap(long, short, default_value_t = Config::ITERATIONS)]
    iterations: usize,
    /// Run all preflop simulations.
    #[clap(long, short)]
    exhaustive: bool,
    /// Show individual hand possibilities.
    #[clap(long, short)]
    possibilities: bool,
    /// Seed for the random simulations.
    #[clap(long, short)]
    seed: Option<u64>,
    /// Number of parallel tasks for exhaustive simulations.
    #[clap(long, short, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=256))]
    tasks: u16,
}

fn run(cli: Cli) -> Result<()> {
    let start = Instant::now();

    let hands = HandSet::holdem(&cli.hands)?;
    let board = Board::new(&cli.board)?;

    let config = Config {
        iterations: cli.iterations,
        exhaustive: cli.exhaustive,
        seed: cli.seed,
        tasks: cli.tasks as usize,
    };

    info!(
        "Calculating odds for {} hands on board '{board}' with {config:?}",
        hands.len()
    );

    let report = Odds::new(config).calculate(&hands, &board)?;

    let mut stdout = io::stdout().lock();
    terminal::print(
        &mut stdout,
        &board,
        &report,
        cli.possibilities,
        start.elapsed(),
    )
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
