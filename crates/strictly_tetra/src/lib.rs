//! Strictly Tetra - tetrahedral dice on a triangular board
//!
//! A four-sided dice is tipped and spun across triangular cells that point
//! either up or down. A dice may only rest on a cell pointing the same way
//! it does.
//!
//! # Architecture
//!
//! - **Faces**: the five-slot orientation state machine ([`DiceFaces`])
//! - **Planner**: speculative walks with undo and atomic commit ([`MovementPlanner`])
//! - **Board**: consumed adjacency graph and single-occupant cells ([`Board`])
//! - **Players**: dice ownership and board/lost bookkeeping ([`Player`])
//!
//! # Example
//!
//! ```
//! use strictly_tetra::{BoardBuilder, Dice, DiceId, Direction, NeighborIds, PlayerId, Pointing};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = BoardBuilder::new();
//! builder.add_cell(1, Pointing::Up, NeighborIds { right: Some(2), ..Default::default() })?;
//! let middle = NeighborIds { left: Some(1), right: Some(3), ..Default::default() };
//! builder.add_cell(2, Pointing::Up, middle)?;
//! builder.add_cell(3, Pointing::Up, NeighborIds { left: Some(2), ..Default::default() })?;
//! builder.link_declared()?;
//! let mut board = builder.build();
//!
//! // Default faces [1, 2, 3, 4, 0]: top face 2, pointing up.
//! let mut dice = Dice::new(DiceId::new(PlayerId(1), 0));
//! dice.place_on(&mut board, 1)?;
//! dice.tentative_move(&board, Direction::Right)?;
//! dice.tentative_move(&board, Direction::Right)?;
//! assert_eq!(dice.commit(&mut board)?, 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod contracts;
mod dice;
mod direction;
mod error;
mod faces;
pub mod invariants;
#[cfg(kani)]
mod kani_support;
mod planner;
mod player;
mod snapshot;

// Crate-level exports - Orientation
pub use direction::{Direction, Pointing, Spin};
pub use faces::{DiceFaces, FaceNumber};

// Crate-level exports - Planning
pub use dice::Dice;
pub use planner::{MovementPlanner, Step};

// Crate-level exports - Board
pub use board::{
    Board, BoardBuilder, Cell, CellAdjacency, CellId, CellOccupancy, Neighbor, NeighborIds,
};

// Crate-level exports - Players
pub use player::{DEFAULT_DICE_PER_PLAYER, DiceId, Player, PlayerId};
pub use snapshot::SimplifiedDice;

// Crate-level exports - Contracts and errors
pub use contracts::{
    Contract, MovesAvailable, PlannerContract, TipAllowed, TipContract, WalkComplete,
};
pub use error::{BoardError, MoveError};
pub use invariants::{
    FaceInvariants, Invariant, InvariantSet, InvariantViolation, PlannerInvariants,
};
