//! Legal-move agreement: the listed moves are exactly the capturing cells.

use super::super::rules::is_legal;
use super::super::{Coordinate, InProgressBoard};
use super::Invariant;

/// Invariant: a cell is in `available_moves` iff it is empty and placing the
/// side to move there flips at least one stone.
pub struct LegalMovesInvariant;

impl Invariant<InProgressBoard> for LegalMovesInvariant {
    fn holds(game: &InProgressBoard) -> bool {
        let board = game.board();
        let side = game.player_turn();

        Coordinate::all().all(|cell| {
            let legal = !board.is_occupied(cell) && is_legal(board, side, cell);
            legal == game.is_available(cell)
        })
    }

    fn description() -> &'static str {
        "Available moves are exactly the cells that capture for the side to move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_holds() {
        assert!(LegalMovesInvariant::holds(&InProgressBoard::opening()));
    }

    #[test]
    fn test_missing_move_violates() {
        let mut game = InProgressBoard::opening();
        game.available_moves.pop();
        assert!(!LegalMovesInvariant::holds(&game));
    }

    #[test]
    fn test_extra_move_violates() {
        let mut game = InProgressBoard::opening();
        game.available_moves.push(Coordinate::new(0, 0).unwrap());
        assert!(!LegalMovesInvariant::holds(&game));
    }
}
