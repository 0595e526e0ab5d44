//! Legal move generation and turn advancement.

use super::super::{Board, Coordinate, Side};
use super::capture::is_legal;
use super::frontier::Frontier;
use tracing::{debug, instrument};

/// Who moves after a move has been played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextTurn {
    /// The opponent has a move, turn alternates.
    Alternate {
        /// Side to move next.
        side: Side,
        /// Its legal moves, in frontier order.
        moves: Vec<Coordinate>,
    },
    /// The opponent has no move and passes; the same side moves again.
    Pass {
        /// Side to move next (the side that just moved).
        side: Side,
        /// Its legal moves, in frontier order.
        moves: Vec<Coordinate>,
    },
    /// Neither side has a legal move. Finishing the game is up to the caller.
    Exhausted,
}

/// Returns the frontier cells that are legal moves for `side`, in frontier
/// order.
#[instrument(skip(frontier, board), fields(side = %side, frontier = frontier.len()))]
pub fn legal_moves(side: Side, frontier: &Frontier, board: &Board) -> Vec<Coordinate> {
    frontier
        .iter()
        .filter(|cell| is_legal(board, side, *cell))
        .collect()
}

/// Decides whose turn follows a move by `mover`.
///
/// The opponent is tried first; if it has no move, `mover` is tried.
#[instrument(skip(frontier, board), fields(mover = %mover))]
pub fn next_turn(mover: Side, frontier: &Frontier, board: &Board) -> NextTurn {
    let opponent = mover.opponent();
    let moves = legal_moves(opponent, frontier, board);
    if !moves.is_empty() {
        return NextTurn::Alternate {
            side: opponent,
            moves,
        };
    }

    let moves = legal_moves(mover, frontier, board);
    if !moves.is_empty() {
        debug!(passing = %opponent, "Opponent has no legal move, forced pass");
        return NextTurn::Pass { side: mover, moves };
    }

    debug!("No legal move for either side");
    NextTurn::Exhausted
}
