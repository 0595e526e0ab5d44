//! Phase-specific board state.
//!
//! Each phase is its own variant carrying only the fields valid in that
//! phase. There is no way to ask a game that has not started for its moves.

use super::rules::{apply_move, legal_moves, next_turn, Frontier, NextTurn};
use super::{Board, Coordinate, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Board state across the game lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BoardState {
    /// No board yet.
    #[default]
    NotStarted,
    /// Game in progress.
    InProgress(InProgressBoard),
    /// Game over.
    Finished(FinishedBoard),
}

impl BoardState {
    /// Name of the phase, for logging and display.
    pub fn phase(&self) -> &'static str {
        match self {
            BoardState::NotStarted => "NOT_STARTED",
            BoardState::InProgress(_) => "STARTED",
            BoardState::Finished(_) => "FINISHED",
        }
    }

    /// Returns the in-progress board, if the game is running.
    pub fn in_progress(&self) -> Option<&InProgressBoard> {
        match self {
            BoardState::InProgress(board) => Some(board),
            _ => None,
        }
    }

    /// Returns the stones on the board, if there is one.
    pub fn board(&self) -> Option<&Board> {
        match self {
            BoardState::NotStarted => None,
            BoardState::InProgress(game) => Some(game.board()),
            BoardState::Finished(game) => Some(game.board()),
        }
    }
}

/// A running game: stones, frontier, moves for the side to play.
///
/// Invariants:
/// - no frontier cell is occupied, and every empty neighbor of a stone is in
///   the frontier
/// - `available_moves` are exactly the frontier cells legal for `player_turn`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InProgressBoard {
    pub(crate) board: Board,
    pub(crate) frontier: Frontier,
    pub(crate) available_moves: Vec<Coordinate>,
    pub(crate) player_turn: Side,
    pub(crate) show_moves: bool,
}

/// Result of playing a move on an [`InProgressBoard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Someone still has a move.
    Continues(InProgressBoard),
    /// Neither side has a move left. The board is kept with the mover to
    /// play and an empty move list.
    Exhausted(InProgressBoard),
}

impl MoveOutcome {
    /// Returns the resulting board regardless of outcome.
    pub fn into_board(self) -> InProgressBoard {
        match self {
            MoveOutcome::Continues(board) | MoveOutcome::Exhausted(board) => board,
        }
    }
}

impl InProgressBoard {
    /// The standard opening with Black to move and move hints shown.
    #[instrument]
    pub fn opening() -> Self {
        let board = Board::opening();
        let frontier = Frontier::opening();
        let available_moves = legal_moves(Side::Black, &frontier, &board);
        Self {
            board,
            frontier,
            available_moves,
            player_turn: Side::Black,
            show_moves: true,
        }
    }

    /// Builds a running game from an arbitrary position.
    ///
    /// The frontier is scanned from the board. The move list is computed for
    /// `to_move` without applying the pass rule.
    #[instrument(skip(board))]
    pub fn from_position(board: Board, to_move: Side) -> Self {
        let frontier = Frontier::scan(&board);
        let available_moves = legal_moves(to_move, &frontier, &board);
        Self {
            board,
            frontier,
            available_moves,
            player_turn: to_move,
            show_moves: true,
        }
    }

    /// Plays `at` for the side to move and decides who moves next.
    ///
    /// The move is trusted: it is applied even if it is not in
    /// [`available_moves`](Self::available_moves).
    #[instrument(skip(self), fields(mover = %self.player_turn, at = %at))]
    pub fn play(&self, at: Coordinate) -> MoveOutcome {
        let mover = self.player_turn;
        let board = apply_move(&self.board, mover, at);
        let frontier = self.frontier.advance(&board, at);

        match next_turn(mover, &frontier, &board) {
            NextTurn::Alternate { side, moves } | NextTurn::Pass { side, moves } => {
                debug!(next = %side, moves = moves.len(), "Turn advanced");
                MoveOutcome::Continues(Self {
                    board,
                    frontier,
                    available_moves: moves,
                    player_turn: side,
                    show_moves: self.show_moves,
                })
            }
            NextTurn::Exhausted => MoveOutcome::Exhausted(Self {
                board,
                frontier,
                available_moves: Vec::new(),
                player_turn: mover,
                show_moves: self.show_moves,
            }),
        }
    }

    /// Ends the game, keeping only the stones.
    pub fn finish(self) -> FinishedBoard {
        FinishedBoard { board: self.board }
    }

    /// Checks whether the side to move has no legal move.
    pub fn is_exhausted(&self) -> bool {
        self.available_moves.is_empty()
    }

    /// Checks whether `at` is a legal move for the side to move.
    pub fn is_available(&self, at: Coordinate) -> bool {
        self.available_moves.contains(&at)
    }

    /// Returns the stones.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the frontier.
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    /// Returns the legal moves for the side to move.
    pub fn available_moves(&self) -> &[Coordinate] {
        &self.available_moves
    }

    /// Returns the side to move.
    pub fn player_turn(&self) -> Side {
        self.player_turn
    }

    /// Returns whether move hints are displayed.
    pub fn show_moves(&self) -> bool {
        self.show_moves
    }
}

/// A finished game. Only the final stones are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedBoard {
    board: Board,
}

impl FinishedBoard {
    /// Returns the final stones.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Stone counts as (black, white).
    pub fn score(&self) -> (u32, u32) {
        (self.board.count(Side::Black), self.board.count(Side::White))
    }

    /// Decides the outcome by stone count.
    pub fn outcome(&self) -> Outcome {
        let (black, white) = self.score();
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Winner(Side::Black),
            std::cmp::Ordering::Less => Outcome::Winner(Side::White),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Side with more stones.
    Winner(Side),
    /// Equal stone counts.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::Winner(side) => Some(*side),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(side) => write!(f, "{} wins", side),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}
