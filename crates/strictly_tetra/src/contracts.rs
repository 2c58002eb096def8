//! Contract-based validation for dice movement.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. Preconditions are always checked; postconditions run in
//! debug builds.

use crate::direction::Direction;
use crate::error::MoveError;
use crate::faces::DiceFaces;
use crate::invariants::{FaceInvariants, InvariantSet, PlannerInvariants};
use crate::planner::MovementPlanner;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

fn describe(violations: &[crate::invariants::InvariantViolation]) -> String {
    violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: a vertical tip must head toward the empty null-zone slot.
pub struct TipAllowed;

impl TipAllowed {
    /// Fails with `InvalidDirection` when the tip is not legal.
    #[instrument(skip(faces), fields(faces = %faces))]
    pub fn check(faces: &DiceFaces, direction: Direction) -> Result<(), MoveError> {
        if faces.can_tip(direction) {
            Ok(())
        } else {
            warn!(%direction, pointing = %faces.pointing(), "Illegal vertical tip");
            Err(MoveError::InvalidDirection(direction))
        }
    }
}

/// Precondition: the walk still has moves left.
pub struct MovesAvailable;

impl MovesAvailable {
    /// Fails with `MovesExhausted` once the counter is zero.
    #[instrument(skip(planner))]
    pub fn check(planner: &MovementPlanner) -> Result<(), MoveError> {
        if planner.moves_left() == 0 {
            warn!("Move counter exhausted");
            Err(MoveError::MovesExhausted)
        } else {
            Ok(())
        }
    }
}

/// Precondition: a walk may only be committed once every move is spent.
pub struct WalkComplete;

impl WalkComplete {
    /// Fails with `MovesRemaining` or `NoTentativeMoves`.
    #[instrument(skip(planner))]
    pub fn check(planner: &MovementPlanner) -> Result<(), MoveError> {
        if !planner.can_finish_moving() {
            warn!(remaining = planner.moves_left(), "Commit attempted early");
            return Err(MoveError::MovesRemaining {
                remaining: planner.moves_left(),
            });
        }
        if !planner.is_walking() {
            warn!("Commit attempted without tentative moves");
            return Err(MoveError::NoTentativeMoves);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Tip Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for tipping a dice.
///
/// Preconditions:
/// - Vertical tips only toward the empty null-zone slot
///
/// Postconditions:
/// - Real faces stay distinct and non-zero
/// - Exactly one null-zone slot is empty
/// - Faces 1-4 appear once each
pub struct TipContract;

impl Contract<DiceFaces, Direction> for TipContract {
    fn pre(faces: &DiceFaces, direction: &Direction) -> Result<(), MoveError> {
        TipAllowed::check(faces, *direction)
    }

    fn post(_before: &DiceFaces, after: &DiceFaces) -> Result<(), MoveError> {
        FaceInvariants::check_all(after).map_err(|violations| {
            MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                describe(&violations)
            ))
        })
    }
}

/// Contract for planner transitions (tentative move, undo, commit, reset).
pub struct PlannerContract;

impl Contract<MovementPlanner, Direction> for PlannerContract {
    fn pre(planner: &MovementPlanner, direction: &Direction) -> Result<(), MoveError> {
        MovesAvailable::check(planner)?;
        TipAllowed::check(planner.speculative(), *direction)
    }

    fn post(_before: &MovementPlanner, after: &MovementPlanner) -> Result<(), MoveError> {
        PlannerInvariants::check_all(after).map_err(|violations| {
            MoveError::InvariantViolation(format!(
                "Postcondition failed: {}",
                describe(&violations)
            ))
        })
    }
}

/// Asserts that all planner invariants hold (panic on violation in debug builds).
#[instrument(skip(planner))]
pub fn assert_invariants(planner: &MovementPlanner) {
    debug_assert!(
        PlannerInvariants::check_all(planner).is_ok(),
        "Planner invariants violated"
    );
    debug_assert!(
        FaceInvariants::check_all(planner.committed()).is_ok(),
        "Committed faces corrupted"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_vertical_tip() {
        let faces = DiceFaces::new();
        assert!(TipContract::pre(&faces, &Direction::Down).is_ok());
        assert_eq!(
            TipContract::pre(&faces, &Direction::Up),
            Err(MoveError::InvalidDirection(Direction::Up))
        );
    }

    #[test]
    fn test_precondition_horizontal_always_allowed() {
        let faces = DiceFaces::new();
        assert!(TipContract::pre(&faces, &Direction::Left).is_ok());
        assert!(TipContract::pre(&faces, &Direction::Right).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = DiceFaces::new();
        let corrupt = DiceFaces::from_raw([1, 2, 3, 3, 0]);
        assert!(matches!(
            TipContract::post(&before, &corrupt),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_walk_complete_requires_zero_moves() {
        let planner = MovementPlanner::new();
        assert_eq!(
            WalkComplete::check(&planner),
            Err(MoveError::MovesRemaining { remaining: 2 })
        );
    }

    #[test]
    fn test_planner_postcondition_holds_for_fresh_planner() {
        let planner = MovementPlanner::new();
        assert!(PlannerContract::post(&planner, &planner).is_ok());
    }
}
