//! Strictly Tetra - simulation CLI
//!
//! Tumbles dice onto a triangular board and plays seeded turns of
//! speculative walks.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use std::path::PathBuf;
use strictly_tetra::{CellId, NeighborIds, Pointing};
use strictly_tetra_sim::{SimConfig, SimReport, Simulation};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            seed,
            turns,
            json,
        } => run_simulation(config, seed, turns, json),
        Command::Board { config } => print_board(config),
    }
}

/// Loads the config file if given, otherwise the defaults.
#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<SimConfig> {
    match path {
        Some(path) => Ok(SimConfig::from_file(path)?),
        None => {
            info!("No config file, using defaults");
            Ok(SimConfig::default())
        }
    }
}

/// Run a simulation and print the report
#[instrument]
fn run_simulation(
    config: Option<PathBuf>,
    seed: Option<u64>,
    turns: Option<u32>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if let Some(turns) = turns {
        config = config.with_turns(turns);
    }

    info!(seed = *config.seed(), turns = *config.turns(), "Starting simulation");
    let report = Simulation::new(config)?.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SimReport) {
    println!(
        "seed {} | {} rounds | {} walks committed | {} spins",
        report.seed, report.turns, report.moves, report.spins
    );
    for dice in &report.dice {
        let place = match (dice.cell, dice.lost) {
            (Some(cell), _) => format!("cell {cell}"),
            (None, true) => "lost".to_string(),
            (None, false) => "off board".to_string(),
        };
        let f = &dice.faces;
        println!(
            "dice {:>3}  [{},{},{},{},{}]  top {}  {}",
            dice.id, f.left, f.top, f.right, f.up, f.down, f.top, place
        );
    }
}

#[derive(Serialize)]
struct CellView {
    id: CellId,
    pointing: Pointing,
    neighbors: NeighborIds,
}

/// Print the linked board graph
#[instrument]
fn print_board(config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config)?;
    let board = config.build_board()?;
    let cells: Vec<CellView> = board
        .cell_ids()
        .filter_map(|id| {
            let cell = board.cell(id)?;
            Some(CellView {
                id,
                pointing: cell.pointing(),
                neighbors: cell.neighbor_ids(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&cells)?);
    Ok(())
}
