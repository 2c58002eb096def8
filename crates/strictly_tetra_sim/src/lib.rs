//! Simulation driver for tetrahedral dice on a triangular board.
//!
//! Loads a board and roster from TOML, tumbles every dice onto a fitting
//! cell, then plays seeded turns of speculative walks and reports the final
//! state of every dice.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod sim;

pub use config::{CellConfig, ConfigError, SimConfig};
pub use sim::{DiceReport, SimReport, Simulation, TurnOutcome};
