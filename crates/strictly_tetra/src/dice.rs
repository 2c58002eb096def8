//! A dice: identity plus its movement planner.

use crate::board::{CellAdjacency, CellId, CellOccupancy};
use crate::direction::{Direction, Pointing, Spin};
use crate::error::MoveError;
use crate::faces::{DiceFaces, FaceNumber};
use crate::planner::{MovementPlanner, Step};
use crate::player::{DiceId, PlayerId};
use crate::snapshot::SimplifiedDice;
use rand::Rng;
use tracing::instrument;

/// A tetrahedral dice owned by one player.
///
/// The owner is fixed at creation. The dice knows which cell it rests on by
/// id; the board separately knows which dice occupies each cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dice {
    id: DiceId,
    planner: MovementPlanner,
}

impl Dice {
    /// Creates an off-board dice with the default faces.
    pub fn new(id: DiceId) -> Self {
        Self::with_faces(id, DiceFaces::new())
    }

    /// Creates an off-board dice with the given faces.
    pub fn with_faces(id: DiceId, faces: DiceFaces) -> Self {
        Self {
            id,
            planner: MovementPlanner::with_faces(faces),
        }
    }

    /// Dice id.
    pub fn id(&self) -> DiceId {
        self.id
    }

    /// Owning player.
    pub fn owner(&self) -> PlayerId {
        self.id.owner()
    }

    /// The planner holding committed and speculative state.
    pub fn planner(&self) -> &MovementPlanner {
        &self.planner
    }

    /// Committed faces.
    pub fn faces(&self) -> &DiceFaces {
        self.planner.committed()
    }

    /// Committed top face.
    pub fn top_face(&self) -> FaceNumber {
        self.planner.committed().top()
    }

    /// Committed pointing direction.
    pub fn pointing(&self) -> Pointing {
        self.planner.pointing()
    }

    /// Pointing direction at the end of the tentative walk.
    pub fn speculative_pointing(&self) -> Pointing {
        self.planner.speculative_pointing()
    }

    /// Resting cell.
    pub fn cell(&self) -> Option<CellId> {
        self.planner.cell()
    }

    /// Live move counter.
    pub fn moves_left(&self) -> u8 {
        self.planner.moves_left()
    }

    /// Tentative steps taken so far.
    pub fn steps(&self) -> &[Step] {
        self.planner.steps()
    }

    /// Tentative position.
    pub fn speculative_position(&self) -> Option<CellId> {
        self.planner.speculative_position()
    }

    /// Whether a walk is in progress.
    pub fn is_walking(&self) -> bool {
        self.planner.is_walking()
    }

    /// Whether the walk may be committed.
    pub fn can_finish_moving(&self) -> bool {
        self.planner.can_finish_moving()
    }

    /// See [`MovementPlanner::tentative_move`].
    #[instrument(skip(self, board), fields(dice = %self.id))]
    pub fn tentative_move<B: CellAdjacency + ?Sized>(
        &mut self,
        board: &B,
        direction: Direction,
    ) -> Result<CellId, MoveError> {
        self.planner.tentative_move(board, direction)
    }

    /// See [`MovementPlanner::undo_last_move`].
    #[instrument(skip(self), fields(dice = %self.id))]
    pub fn undo_last_move(&mut self) -> Result<CellId, MoveError> {
        self.planner.undo_last_move()
    }

    /// See [`MovementPlanner::commit`].
    #[instrument(skip(self, board), fields(dice = %self.id))]
    pub fn commit<B: CellAdjacency + CellOccupancy + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<CellId, MoveError> {
        self.planner.commit(board, self.id)
    }

    /// See [`MovementPlanner::reset_speculation`].
    #[instrument(skip(self), fields(dice = %self.id))]
    pub fn reset_speculation(&mut self) {
        self.planner.reset_speculation();
    }

    /// Spins the committed faces in place.
    #[instrument(skip(self), fields(dice = %self.id))]
    pub fn rotate(&mut self, side: Spin) {
        self.planner.rotate(side);
    }

    /// Re-randomizes the committed faces.
    #[instrument(skip(self, rng), fields(dice = %self.id))]
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.planner.roll(rng);
    }

    /// Tumbles the committed faces through `count` random steps.
    #[instrument(skip(self, rng), fields(dice = %self.id))]
    pub fn simulated_roll<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.planner.simulated_roll(count, rng);
    }

    /// Moves the dice onto `cell` unconditionally (no walk, no budget).
    #[instrument(skip(self, board), fields(dice = %self.id))]
    pub fn place_on<B: CellOccupancy + ?Sized>(
        &mut self,
        board: &mut B,
        cell: CellId,
    ) -> Result<(), MoveError> {
        self.planner.place_on(board, self.id, cell)
    }

    /// Takes the dice off the board.
    #[instrument(skip(self, board), fields(dice = %self.id))]
    pub fn remove_from_board<B: CellOccupancy + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<CellId, MoveError> {
        self.planner.remove_from_board(board)
    }

    /// Read-only view for rendering.
    pub fn simplified(&self) -> SimplifiedDice {
        SimplifiedDice::from(self)
    }
}

impl std::fmt::Display for Dice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.faces())
    }
}
