//! Rule-violation errors for dice movement and board construction.

use crate::board::CellId;
use crate::direction::{Direction, Pointing};
use crate::player::DiceId;

/// Error raised when a dice operation violates the movement rules.
///
/// Every operation that returns this error leaves the dice, its planner,
/// and the board exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The walk has used every move granted by the top face.
    #[display("No moves left on the dice")]
    MovesExhausted,

    /// The adjacency graph has no cell in that direction.
    #[display("Cell {cell} has no neighbor to the {direction}")]
    NoSuchNeighbor {
        /// Cell the move started from.
        cell: CellId,
        /// Requested direction.
        direction: Direction,
    },

    /// The direction leads to a boundary marker or is an illegal tip.
    #[display("Invalid direction for dice movement: {_0}")]
    InvalidDirection(Direction),

    /// Undo or commit was requested with an empty movement record.
    #[display("Dice has no tentative moves")]
    NoTentativeMoves,

    /// Commit was requested before the move counter reached zero.
    #[display("Can't finish dice move with {remaining} moves left")]
    MovesRemaining {
        /// Moves still available.
        remaining: u8,
    },

    /// The target cell already holds another dice.
    #[display("Cell {cell} already contains dice {occupant}")]
    CellOccupied {
        /// Target cell.
        cell: CellId,
        /// Dice currently resting there.
        occupant: DiceId,
    },

    /// The dice points the other way from the cell it would rest on.
    #[display("Dice pointing {dice} doesn't fit cell {cell} pointing {cell_pointing}")]
    DieDoesNotFit {
        /// Target cell.
        cell: CellId,
        /// Pointing direction of the dice.
        dice: Pointing,
        /// Pointing direction of the cell.
        cell_pointing: Pointing,
    },

    /// Tried to remove a dice from an empty cell.
    #[display("Cell {_0} is empty")]
    CellEmpty(CellId),

    /// The dice is not resting on any cell.
    #[display("Dice is not on the board")]
    NotOnBoard,

    /// The cell id is not part of the board.
    #[display("Unknown cell {_0}")]
    UnknownCell(CellId),

    /// The dice id does not belong to the player.
    #[display("Unknown dice {_0}")]
    UnknownDice(DiceId),

    /// Raw face slots that break the orientation invariants.
    #[display("Malformed faces {_0:?}")]
    MalformedFaces([u8; 5]),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Error raised while wiring the board's adjacency graph.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The same cell id was declared twice.
    #[display("Cell {_0} declared twice")]
    DuplicateCell(CellId),

    /// A link refers to an undeclared cell.
    #[display("Unknown cell {_0}")]
    UnknownCell(CellId),

    /// The neighbor slot was already linked.
    #[display("Cell {cell} already has a(n) {direction} neighbor: {existing}")]
    NeighborAlreadySet {
        /// Cell whose slot is taken.
        cell: CellId,
        /// Slot direction.
        direction: Direction,
        /// Cell already linked there.
        existing: CellId,
    },

    /// The linked cell is not the one the slot was declared with.
    #[display("Cell {cell} expected {direction} neighbor {expected:?}, got {found}")]
    UnexpectedNeighbor {
        /// Cell being linked.
        cell: CellId,
        /// Slot direction.
        direction: Direction,
        /// Declared neighbor id, if any.
        expected: Option<CellId>,
        /// Cell actually offered.
        found: CellId,
    },
}

impl std::error::Error for BoardError {}
