//! Shared fixtures for integration tests.

#![allow(dead_code)]

use strictly_tetra::{Board, BoardBuilder, CellId, NeighborIds, Pointing};

/// Number of columns in the test band.
pub const COLUMNS: CellId = 8;

/// Id of the up-pointing cell in column `c`.
pub fn up_cell(c: CellId) -> CellId {
    10 + c
}

/// Id of the down-pointing cell in column `c`.
pub fn down_cell(c: CellId) -> CellId {
    30 + c
}

/// Two-row band: an up-pointing row over a down-pointing row.
///
/// Horizontal neighbours share a row; each up cell tips down onto the cell
/// beneath it. The outer left/right ids point at cells that do not exist
/// and stay as boundary markers.
pub fn band() -> Board {
    let mut builder = BoardBuilder::new();
    for c in 0..COLUMNS {
        builder
            .add_cell(
                up_cell(c),
                Pointing::Up,
                NeighborIds {
                    up: None,
                    down: Some(down_cell(c)),
                    left: Some(up_cell(c) - 1),
                    right: Some(up_cell(c) + 1),
                },
            )
            .expect("unique up cell");
        builder
            .add_cell(
                down_cell(c),
                Pointing::Down,
                NeighborIds {
                    up: Some(up_cell(c)),
                    down: None,
                    left: Some(down_cell(c) - 1),
                    right: Some(down_cell(c) + 1),
                },
            )
            .expect("unique down cell");
    }
    builder.link_declared().expect("consistent band");
    builder.build()
}
