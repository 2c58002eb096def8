//! Planner invariants: move-budget conservation and idle speculation.

use super::Invariant;
use crate::MovementPlanner;

/// Invariant: moves left plus tentative steps equals the committed top face.
///
/// Each tentative move spends one unit of the budget and each undo refunds
/// it, so the counter never goes negative or above the starting value.
pub struct MoveBudgetInvariant;

impl Invariant<MovementPlanner> for MoveBudgetInvariant {
    fn holds(planner: &MovementPlanner) -> bool {
        usize::from(planner.moves_left()) + planner.steps().len()
            == usize::from(planner.budget())
    }

    fn description() -> &'static str {
        "Moves left plus tentative steps equals the committed top face"
    }
}

/// Invariant: with no tentative steps the speculative faces equal the committed ones.
pub struct SpeculationInvariant;

impl Invariant<MovementPlanner> for SpeculationInvariant {
    fn holds(planner: &MovementPlanner) -> bool {
        planner.is_walking() || planner.speculative() == planner.committed()
    }

    fn description() -> &'static str {
        "Idle planner mirrors the committed faces"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_planner_holds() {
        let planner = MovementPlanner::new();
        assert!(MoveBudgetInvariant::holds(&planner));
        assert!(SpeculationInvariant::holds(&planner));
    }
}
