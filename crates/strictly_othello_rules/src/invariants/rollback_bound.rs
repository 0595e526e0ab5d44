//! Rollback bound invariant: staged moves stay within the protocol limit.

use super::super::state::MAX_STAGED_MOVES;
use super::super::AppState;
use super::Invariant;

/// Invariant: `undo_count` mirrors the rollback stack depth, never exceeds
/// [`MAX_STAGED_MOVES`], and a pending move exists iff something is staged.
pub struct RollbackBoundInvariant;

impl Invariant<AppState> for RollbackBoundInvariant {
    fn holds(state: &AppState) -> bool {
        let depth = state.rollback().len();
        depth == state.undo_count()
            && depth <= MAX_STAGED_MOVES
            && state.pending_move().is_some() == (depth > 0)
    }

    fn description() -> &'static str {
        "Undo count matches rollback depth, bounded by the staged-move limit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reduce, Action, Coordinate};

    #[test]
    fn test_fresh_state_holds() {
        assert!(RollbackBoundInvariant::holds(&AppState::new()));
    }

    #[test]
    fn test_staged_move_holds() {
        let state = reduce(&AppState::new(), Action::Initialize);
        let state = reduce(&state, Action::PreviewMove(Coordinate::new(2, 3).unwrap()));
        assert_eq!(state.undo_count(), 1);
        assert!(RollbackBoundInvariant::holds(&state));
    }

    #[test]
    fn test_mismatched_counter_violates() {
        let mut state = AppState::new();
        state.undo_count = 1;
        assert!(!RollbackBoundInvariant::holds(&state));
    }
}
