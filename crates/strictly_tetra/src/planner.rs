//! Speculative movement planning for a single dice.
//!
//! A walk is explored on a copy of the committed faces. Each tentative
//! step records the cell reached and the direction that undoes it, and
//! spends one move from the budget granted by the committed top face.
//! Nothing touches the board until [`MovementPlanner::commit`], which is the
//! only irreversible transition.

use crate::board::{CellAdjacency, CellId, CellOccupancy, Neighbor};
use crate::contracts::{
    Contract, MovesAvailable, PlannerContract, WalkComplete, assert_invariants,
};
use crate::direction::{Direction, Pointing, Spin};
use crate::error::MoveError;
use crate::faces::{DiceFaces, FaceNumber};
use crate::player::DiceId;
use derive_new::new;
use rand::Rng;
use tracing::{debug, instrument, warn};

/// One tentative step of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Step {
    /// Cell occupied after the step.
    pub cell: CellId,
    /// Direction that takes the dice back.
    pub undo: Direction,
}

/// Committed orientation, speculative copy, and the walk in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementPlanner {
    committed: DiceFaces,
    speculative: DiceFaces,
    steps: Vec<Step>,
    moves_left: u8,
    cell: Option<CellId>,
}

impl MovementPlanner {
    /// Creates an idle planner with the default faces and no cell.
    pub fn new() -> Self {
        Self::with_faces(DiceFaces::new())
    }

    /// Creates an idle planner around the given committed faces.
    pub fn with_faces(faces: DiceFaces) -> Self {
        Self {
            committed: faces,
            speculative: faces,
            steps: Vec::new(),
            moves_left: faces.top(),
            cell: None,
        }
    }

    /// Board-visible orientation.
    pub fn committed(&self) -> &DiceFaces {
        &self.committed
    }

    /// Orientation at the end of the tentative walk.
    pub fn speculative(&self) -> &DiceFaces {
        &self.speculative
    }

    /// Tentative steps, oldest first.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Live move counter.
    pub fn moves_left(&self) -> u8 {
        self.moves_left
    }

    /// Moves granted to a walk: the committed top face.
    pub fn budget(&self) -> FaceNumber {
        self.committed.top()
    }

    /// Cell the dice rests on.
    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }

    /// Whether a walk is in progress.
    pub fn is_walking(&self) -> bool {
        !self.steps.is_empty()
    }

    /// Whether the walk may be committed.
    pub fn can_finish_moving(&self) -> bool {
        self.moves_left == 0
    }

    /// Committed pointing direction.
    pub fn pointing(&self) -> Pointing {
        self.committed.pointing()
    }

    /// Pointing direction at the end of the tentative walk.
    pub fn speculative_pointing(&self) -> Pointing {
        self.speculative.pointing()
    }

    /// Tentative position: the last step's cell, or the resting cell.
    pub fn speculative_position(&self) -> Option<CellId> {
        self.steps.last().map(|step| step.cell).or(self.cell)
    }

    /// Takes one tentative step in `direction` and returns the cell reached.
    ///
    /// # Errors
    ///
    /// - `MovesExhausted` when the counter is zero
    /// - `NotOnBoard` when the walk has no starting cell
    /// - `NoSuchNeighbor` when the graph has no cell there
    /// - `InvalidDirection` for a boundary marker or an illegal vertical tip
    ///
    /// On error nothing changes.
    #[instrument(skip(self, board), fields(moves_left = self.moves_left))]
    pub fn tentative_move<B: CellAdjacency + ?Sized>(
        &mut self,
        board: &B,
        direction: Direction,
    ) -> Result<CellId, MoveError> {
        MovesAvailable::check(self)?;

        let from = self.speculative_position().ok_or_else(|| {
            warn!("Dice is not on the board");
            MoveError::NotOnBoard
        })?;

        let target = match board.neighbor(from, direction) {
            Neighbor::Linked(target) => target,
            Neighbor::Unlinked(marker) => {
                warn!(from, %direction, marker, "Neighbor is only a boundary marker");
                return Err(MoveError::InvalidDirection(direction));
            }
            Neighbor::Missing => {
                warn!(from, %direction, "No cell in that direction");
                return Err(MoveError::NoSuchNeighbor {
                    cell: from,
                    direction,
                });
            }
        };

        #[cfg(debug_assertions)]
        let before = self.clone();

        PlannerContract::pre(self, &direction)?;
        self.speculative.tip(direction)?;
        self.steps.push(Step::new(target, direction.inverse()));
        self.moves_left -= 1;

        #[cfg(debug_assertions)]
        PlannerContract::post(&before, self)?;

        debug!(from, to = target, %direction, moves_left = self.moves_left, "Tentative move");
        Ok(target)
    }

    /// Reverts the most recent tentative step.
    ///
    /// Returns the new tentative position.
    ///
    /// # Errors
    ///
    /// `NoTentativeMoves` when the record is empty.
    #[instrument(skip(self), fields(steps = self.steps.len()))]
    pub fn undo_last_move(&mut self) -> Result<CellId, MoveError> {
        let Some(last) = self.steps.last().copied() else {
            warn!("No tentative moves to undo");
            return Err(MoveError::NoTentativeMoves);
        };
        let position = match self.steps.len() {
            1 => self.cell.ok_or(MoveError::NotOnBoard)?,
            n => self.steps[n - 2].cell,
        };

        let mut restored = self.speculative;
        restored.tip(last.undo)?;

        self.speculative = restored;
        self.steps.pop();
        self.moves_left += 1;
        assert_invariants(self);

        debug!(undo = %last.undo, position, moves_left = self.moves_left, "Undid move");
        Ok(position)
    }

    /// Commits the walk: adopts the speculative faces and relocates the dice.
    ///
    /// Returns the new resting cell.
    ///
    /// # Errors
    ///
    /// - `MovesRemaining` when moves are left
    /// - `NoTentativeMoves` when nothing was planned
    /// - `DieDoesNotFit` when the target cell points the other way
    /// - `CellOccupied` when another dice rests there
    ///
    /// All checks run before anything is mutated.
    #[instrument(skip(self, board), fields(moves_left = self.moves_left))]
    pub fn commit<B: CellAdjacency + CellOccupancy + ?Sized>(
        &mut self,
        board: &mut B,
        dice: DiceId,
    ) -> Result<CellId, MoveError> {
        WalkComplete::check(self)?;
        let target = self
            .steps
            .last()
            .map(|step| step.cell)
            .ok_or(MoveError::NoTentativeMoves)?;

        let cell_pointing = board
            .pointing(target)
            .ok_or(MoveError::UnknownCell(target))?;
        let pointing = self.speculative.pointing();
        if cell_pointing != pointing {
            warn!(target, %pointing, %cell_pointing, "Dice doesn't fit target cell");
            return Err(MoveError::DieDoesNotFit {
                cell: target,
                dice: pointing,
                cell_pointing,
            });
        }

        if Some(target) != self.cell {
            if let Some(occupant) = board.occupant(target) {
                warn!(target, %occupant, "Target cell occupied");
                return Err(MoveError::CellOccupied {
                    cell: target,
                    occupant,
                });
            }
            relocate(board, dice, pointing, self.cell, target)?;
        }

        self.committed = self.speculative;
        self.cell = Some(target);
        self.steps.clear();
        self.moves_left = self.committed.top();
        assert_invariants(self);

        debug!(%dice, cell = target, faces = %self.committed, "Committed walk");
        Ok(target)
    }

    /// Abandons the walk and mirrors the committed state again.
    #[instrument(skip(self), fields(steps = self.steps.len()))]
    pub fn reset_speculation(&mut self) {
        self.steps.clear();
        self.speculative = self.committed;
        self.moves_left = self.committed.top();
        assert_invariants(self);
    }

    /// Spins the committed faces in place and abandons any walk.
    #[instrument(skip(self))]
    pub fn rotate(&mut self, side: Spin) {
        self.committed.spin(side);
        self.reset_speculation();
    }

    /// Re-randomizes the committed faces and abandons any walk.
    #[instrument(skip_all)]
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.committed.roll(rng);
        self.reset_speculation();
    }

    /// Tumbles the committed faces and abandons any walk.
    #[instrument(skip(self, rng))]
    pub fn simulated_roll<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        self.committed.simulated_roll(count, rng);
        self.reset_speculation();
    }

    /// Moves the dice onto `cell` regardless of any walk.
    ///
    /// Leaves the previous cell, keeps the faces, and abandons the walk.
    ///
    /// # Errors
    ///
    /// Fails with the board's placement error; nothing changes then.
    #[instrument(skip(self, board))]
    pub fn place_on<B: CellOccupancy + ?Sized>(
        &mut self,
        board: &mut B,
        dice: DiceId,
        cell: CellId,
    ) -> Result<(), MoveError> {
        if self.cell != Some(cell) {
            relocate(board, dice, self.committed.pointing(), self.cell, cell)?;
            self.cell = Some(cell);
        }
        self.reset_speculation();
        debug!(%dice, cell, "Dice placed");
        Ok(())
    }

    /// Takes the dice off the board and abandons the walk.
    ///
    /// # Errors
    ///
    /// `NotOnBoard` if the dice rests nowhere, or the board's removal error.
    #[instrument(skip(self, board))]
    pub fn remove_from_board<B: CellOccupancy + ?Sized>(
        &mut self,
        board: &mut B,
    ) -> Result<CellId, MoveError> {
        let cell = self.cell.ok_or(MoveError::NotOnBoard)?;
        board.remove(cell)?;
        self.cell = None;
        self.reset_speculation();
        Ok(cell)
    }
}

/// Moves `dice` from `from` to `to` on the board, or changes nothing.
///
/// The resting cell must still hold `dice`. If clearing it fails after the
/// target was taken, the target is released again.
fn relocate<B: CellOccupancy + ?Sized>(
    board: &mut B,
    dice: DiceId,
    pointing: Pointing,
    from: Option<CellId>,
    to: CellId,
) -> Result<(), MoveError> {
    if let Some(previous) = from {
        match board.occupant(previous) {
            Some(occupant) if occupant == dice => {}
            Some(occupant) => {
                warn!(previous, %dice, %occupant, "Resting cell holds another dice");
                return Err(MoveError::CellOccupied {
                    cell: previous,
                    occupant,
                });
            }
            None => {
                warn!(previous, %dice, "Resting cell no longer holds the dice");
                return Err(MoveError::CellEmpty(previous));
            }
        }
    }

    board.place(dice, pointing, to)?;
    if let Some(previous) = from
        && let Err(e) = board.remove(previous)
    {
        board.remove(to)?;
        return Err(e);
    }
    Ok(())
}

impl Default for MovementPlanner {
    fn default() -> Self {
        Self::new()
    }
}
