//! Contract-based validation for staged moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P(state, action)} action {Q(before, after)}.

use super::invariants::{
    BoardInvariants, Invariant, InvariantSet, InvariantViolation, RollbackBoundInvariant,
};
use super::{AppState, BoardState, Coordinate};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Error reported when a condition fails.
    type Error;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Error>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Self::Error>;
}

/// Why a move could not be staged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum StageError {
    /// There is no running game.
    #[display("No game in progress")]
    NotInProgress,

    /// Another move is staged and not yet resolved.
    #[display("A staged move is already awaiting resolution")]
    StagedMoveOutstanding,

    /// The cell is not a legal move for the side to play.
    #[display("{} is not a legal move", _0)]
    IllegalMove(Coordinate),

    /// A postcondition failed.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for StageError {}

/// Contract for [`Action::PreviewMove`](crate::Action::PreviewMove).
///
/// Preconditions:
/// - a game is in progress
/// - nothing is staged yet
/// - the cell is one of the available moves
///
/// Postconditions:
/// - exactly one more move is staged than before
/// - the rollback top is the board from before staging
/// - board invariants hold for the staged board
/// - the rollback stack stays within its bound
pub struct PreviewContract;

impl Contract<AppState, Coordinate> for PreviewContract {
    type Error = StageError;

    #[instrument(skip(state), fields(at = %at))]
    fn pre(state: &AppState, at: &Coordinate) -> Result<(), StageError> {
        let BoardState::InProgress(game) = state.board_state() else {
            return Err(StageError::NotInProgress);
        };
        if state.undo_count() > 0 {
            return Err(StageError::StagedMoveOutstanding);
        }
        if !game.is_available(*at) {
            return Err(StageError::IllegalMove(*at));
        }
        Ok(())
    }

    fn post(before: &AppState, after: &AppState) -> Result<(), StageError> {
        if after.undo_count() != before.undo_count() + 1 {
            return Err(StageError::InvariantViolation(format!(
                "Undo count went from {} to {}",
                before.undo_count(),
                after.undo_count()
            )));
        }
        if after.rollback().peek() != Some(before.board_state()) {
            return Err(StageError::InvariantViolation(
                "Rollback top is not the pre-stage board".to_string(),
            ));
        }
        check_state(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            StageError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

/// Checks every invariant that applies to a snapshot.
pub fn check_state(state: &AppState) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    if !RollbackBoundInvariant::holds(state) {
        violations.push(InvariantViolation::new(RollbackBoundInvariant::description()));
    }

    if let BoardState::InProgress(game) = state.board_state()
        && let Err(board_violations) = BoardInvariants::check_all(game)
    {
        violations.extend(board_violations);
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Asserts that all invariants hold (panics on violation in debug builds).
#[instrument(skip(state))]
pub fn assert_invariants(state: &AppState) {
    if let Err(violations) = check_state(state) {
        for violation in &violations {
            warn!(description = %violation.description, "Invariant violated");
        }
        debug_assert!(violations.is_empty(), "Invariant violated: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reduce, Action};

    fn c(x: u8, y: u8) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    fn started() -> AppState {
        reduce(&AppState::new(), Action::Initialize)
    }

    #[test]
    fn test_precondition_legal_move() {
        assert!(PreviewContract::pre(&started(), &c(2, 3)).is_ok());
    }

    #[test]
    fn test_precondition_not_started() {
        assert_eq!(
            PreviewContract::pre(&AppState::new(), &c(2, 3)),
            Err(StageError::NotInProgress)
        );
    }

    #[test]
    fn test_precondition_illegal_cell() {
        assert_eq!(
            PreviewContract::pre(&started(), &c(0, 0)),
            Err(StageError::IllegalMove(c(0, 0)))
        );
    }

    #[test]
    fn test_precondition_second_stage() {
        let staged = reduce(&started(), Action::PreviewMove(c(2, 3)));
        assert_eq!(
            PreviewContract::pre(&staged, &c(2, 2)),
            Err(StageError::StagedMoveOutstanding)
        );
    }

    #[test]
    fn test_postcondition_holds_after_stage() {
        let before = started();
        let after = reduce(&before, Action::PreviewMove(c(2, 3)));
        assert!(PreviewContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_relates_before_and_after() {
        let before = started();
        let after = reduce(&before, Action::PreviewMove(c(2, 3)));

        let err = PreviewContract::post(&after, &after).unwrap_err();
        assert!(err.to_string().contains("Undo count went from 1 to 1"));

        let other = reduce(&before, Action::PreviewMove(c(4, 5)));
        let mut before_other = before.clone();
        before_other.board_state = other.board_state().clone();
        let err = PreviewContract::post(&before_other, &after).unwrap_err();
        assert!(err.to_string().contains("Rollback top"));
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = started();
        let mut after = reduce(&before, Action::PreviewMove(c(2, 3)));
        after.pending_move = None;

        let err = PreviewContract::post(&before, &after).unwrap_err();
        assert!(err.to_string().contains("Undo count"));
    }
}
