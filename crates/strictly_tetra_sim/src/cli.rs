//! Command-line interface for strictly_tetra_sim.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Tetra - tetrahedral dice simulation
#[derive(Parser, Debug)]
#[command(name = "strictly_tetra_sim")]
#[command(about = "Seeded tumble-and-walk simulation of tetrahedral dice", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a seeded simulation and print every dice
    Run {
        /// Path to simulation config (TOML). Defaults apply without one.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the configured number of rounds
        #[arg(long)]
        turns: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the linked board graph as JSON
    Board {
        /// Path to simulation config (TOML). Defaults apply without one.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
