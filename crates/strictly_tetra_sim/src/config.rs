//! Simulation configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_tetra::{
    Board, BoardBuilder, BoardError, CellId, DEFAULT_DICE_PER_PLAYER, NeighborIds, Pointing,
};
use tracing::{debug, info, instrument};

/// Id offset of the up-pointing row of the built-in band board.
const BAND_UP_ROW: CellId = 100;
/// Id offset of the down-pointing row of the built-in band board.
const BAND_DOWN_ROW: CellId = 200;
/// Widest band whose rows do not overlap in id space.
const MAX_BAND_COLUMNS: u16 = 99;

/// One declared board cell.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct CellConfig {
    /// Cell id.
    id: CellId,

    /// Cell orientation.
    pointing: Pointing,

    /// Neighbour above.
    #[serde(default)]
    up: Option<CellId>,

    /// Neighbour below.
    #[serde(default)]
    down: Option<CellId>,

    /// Neighbour to the left.
    #[serde(default)]
    left: Option<CellId>,

    /// Neighbour to the right.
    #[serde(default)]
    right: Option<CellId>,
}

impl CellConfig {
    /// Creates a declared cell.
    pub fn new(id: CellId, pointing: Pointing, neighbors: NeighborIds) -> Self {
        Self {
            id,
            pointing,
            up: neighbors.up,
            down: neighbors.down,
            left: neighbors.left,
            right: neighbors.right,
        }
    }

    /// Declared neighbour ids.
    pub fn neighbors(&self) -> NeighborIds {
        NeighborIds {
            up: self.up,
            down: self.down,
            left: self.left,
            right: self.right,
        }
    }
}

/// Configuration for one simulation run.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct SimConfig {
    /// Seed for every random draw of the run.
    #[serde(default = "default_seed")]
    seed: u64,

    /// Number of players.
    #[serde(default = "default_players")]
    players: u8,

    /// Dice handed to each player.
    #[serde(default = "default_dice_per_player")]
    dice_per_player: u8,

    /// Random tips applied to each dice before it is deployed.
    #[serde(default = "default_tumbles")]
    tumbles: usize,

    /// Rounds to play; every on-board dice moves once per round.
    #[serde(default = "default_turns")]
    turns: u32,

    /// Walks tried per dice per turn before it stays put.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,

    /// Columns of the built-in band board, used when `cells` is empty.
    #[serde(default = "default_band_columns")]
    band_columns: u16,

    /// Explicit board layout.
    #[serde(default)]
    cells: Vec<CellConfig>,
}

fn default_seed() -> u64 {
    0
}

fn default_players() -> u8 {
    2
}

fn default_dice_per_player() -> u8 {
    DEFAULT_DICE_PER_PLAYER
}

fn default_tumbles() -> usize {
    8
}

fn default_turns() -> u32 {
    10
}

fn default_max_attempts() -> u32 {
    16
}

fn default_band_columns() -> u16 {
    12
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            players: default_players(),
            dice_per_player: default_dice_per_player(),
            tumbles: default_tumbles(),
            turns: default_turns(),
            max_attempts: default_max_attempts(),
            band_columns: default_band_columns(),
            cells: Vec::new(),
        }
    }
}

impl SimConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        info!(
            seed = config.seed,
            players = config.players,
            cells = config.cells.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Overrides the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the number of rounds.
    pub fn with_turns(mut self, turns: u32) -> Self {
        self.turns = turns;
        self
    }

    /// Rejects settings no run can use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players == 0 {
            return Err(ConfigError::new("players must be at least 1".to_string()));
        }
        if self.dice_per_player == 0 {
            return Err(ConfigError::new(
                "dice_per_player must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        if self.cells.is_empty() && !(1..=MAX_BAND_COLUMNS).contains(&self.band_columns) {
            return Err(ConfigError::new(format!(
                "band_columns must be between 1 and {}",
                MAX_BAND_COLUMNS
            )));
        }
        Ok(())
    }

    /// Builds and links the configured board, or the band board.
    #[instrument(skip(self), fields(cells = self.cells.len()))]
    pub fn build_board(&self) -> Result<Board, BoardError> {
        let cells = if self.cells.is_empty() {
            band_cells(self.band_columns)
        } else {
            self.cells.clone()
        };

        let mut builder = BoardBuilder::new();
        for cell in &cells {
            builder.add_cell(cell.id, cell.pointing, cell.neighbors())?;
        }
        builder.link_declared()?;
        Ok(builder.build())
    }
}

/// Two rows of triangles: up-pointing cells over down-pointing ones.
///
/// Each up cell tips down onto the cell beneath it. The outermost left and
/// right ids are declared but never created, so they remain boundary markers.
fn band_cells(columns: u16) -> Vec<CellConfig> {
    (0..columns)
        .flat_map(|c| {
            let up = BAND_UP_ROW + c;
            let down = BAND_DOWN_ROW + c;
            [
                CellConfig::new(
                    up,
                    Pointing::Up,
                    NeighborIds {
                        up: None,
                        down: Some(down),
                        left: Some(up - 1),
                        right: Some(up + 1),
                    },
                ),
                CellConfig::new(
                    down,
                    Pointing::Down,
                    NeighborIds {
                        up: Some(up),
                        down: None,
                        left: Some(down - 1),
                        right: Some(down + 1),
                    },
                ),
            ]
        })
        .collect()
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
