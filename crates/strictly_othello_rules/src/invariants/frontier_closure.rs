//! Frontier closure invariant: the frontier is exactly the empty cells that
//! touch a stone.

use super::super::{Coordinate, Frontier, InProgressBoard};
use super::Invariant;

/// Invariant: no occupied cell is in the frontier, and every empty neighbor
/// of an occupied cell is.
///
/// Checked against a full-board scan, so it also catches stale entries that
/// no longer touch any stone.
pub struct FrontierClosureInvariant;

impl Invariant<InProgressBoard> for FrontierClosureInvariant {
    fn holds(game: &InProgressBoard) -> bool {
        let board = game.board();
        let frontier = game.frontier();

        if frontier.iter().any(|cell| board.is_occupied(cell)) {
            return false;
        }

        let expected = Frontier::scan(board);
        Coordinate::all().all(|cell| expected.contains(cell) == frontier.contains(cell))
            && expected.len() == frontier.len()
    }

    fn description() -> &'static str {
        "Frontier holds exactly the empty cells adjacent to a stone"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Side};

    fn c(x: u8, y: u8) -> Coordinate {
        Coordinate::new(x, y).unwrap()
    }

    #[test]
    fn test_opening_holds() {
        assert!(FrontierClosureInvariant::holds(&InProgressBoard::opening()));
    }

    #[test]
    fn test_holds_through_a_short_game() {
        let mut game = InProgressBoard::opening();
        for _ in 0..10 {
            let Some(&next) = game.available_moves().first() else {
                break;
            };
            game = game.play(next).into_board();
            assert!(FrontierClosureInvariant::holds(&game));
        }
    }

    #[test]
    fn test_occupied_cell_in_frontier_violates() {
        let mut game = InProgressBoard::opening();
        game.board.place(c(2, 2), Side::Black);
        assert!(!FrontierClosureInvariant::holds(&game));
    }

    #[test]
    fn test_missing_neighbor_violates() {
        let mut game = InProgressBoard::from_position(Board::opening(), Side::Black);
        game.frontier = Frontier::new();
        assert!(!FrontierClosureInvariant::holds(&game));
    }
}
