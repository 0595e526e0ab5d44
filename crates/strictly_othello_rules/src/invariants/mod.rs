//! Properties of a running Othello game that every reducer step preserves.
//!
//! Each property is its own type so tests can target it directly; the
//! reducer checks them all after each step when debug assertions are on.

pub mod frontier_closure;
pub mod legal_moves;
pub mod rollback_bound;

pub use frontier_closure::FrontierClosureInvariant;
pub use legal_moves::LegalMovesInvariant;
pub use rollback_bound::RollbackBoundInvariant;

/// A property checked against a snapshot of type `S`.
pub trait Invariant<S> {
    /// True when `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property, used in violation reports.
    fn description() -> &'static str;
}

/// A property that failed, named by its description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// What the failed property states.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps a property description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several properties over one snapshot type, checked as a group.
///
/// Pairs of [`Invariant`]s form a set; every member runs even after one
/// fails.
pub trait InvariantSet<S> {
    /// Runs every member and returns all failures.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Board invariants of a running game.
pub type BoardInvariants = (FrontierClosureInvariant, LegalMovesInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, InProgressBoard};

    #[test]
    fn test_board_invariants_hold_for_opening() {
        assert!(BoardInvariants::check_all(&InProgressBoard::opening()).is_ok());
    }

    #[test]
    fn test_board_invariants_hold_after_moves() {
        let game = InProgressBoard::opening();
        let game = game.play(Coordinate::new(2, 3).unwrap()).into_board();
        let game = game.play(Coordinate::new(2, 2).unwrap()).into_board();
        assert!(BoardInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_board_invariants_report_every_violation() {
        let mut game = InProgressBoard::opening();
        game.frontier = crate::Frontier::new();
        game.available_moves.clear();

        // An empty frontier breaks closure; an empty move list then agrees
        // with the frontier but not with the board.
        let violations = BoardInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
