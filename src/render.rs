//! Plain-text rendering of a session snapshot.

use crate::store::Dispatcher;
use std::fmt;
use strictly_othello_rules::{Action, AppState, BoardState, Coordinate, Side, BOARD_SIZE};

/// Renders the snapshot as a text board with a status header.
///
/// Black stones are `X`, white stones `O`. The staged stone is bracketed,
/// `[X]` or `[O]`. When it is the local player's turn and hints are on,
/// legal moves are marked `*`.
pub fn render(state: &AppState) -> String {
    Rendered(state).to_string()
}

struct Rendered<'a>(&'a AppState);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        match state.side() {
            Some(side) => writeln!(f, "YOUR SIDE: {}", side)?,
            None => writeln!(f, "YOUR SIDE: NOT_ASSIGNED")?,
        }

        let board = match state.board_state() {
            BoardState::NotStarted => return writeln!(f, "Waiting for the game to start"),
            BoardState::InProgress(game) => {
                let status = if state.pending_move().is_some() {
                    "MOVE STAGED"
                } else if state.is_local_turn() {
                    "YOUR TURN"
                } else {
                    "OPPONENT'S TURN"
                };
                writeln!(f, "{} ({} to move)", status, game.player_turn())?;
                game.board()
            }
            BoardState::Finished(game) => {
                writeln!(f, "GAME OVER: {}", game.outcome())?;
                game.board()
            }
        };

        writeln!(
            f,
            "BLACK: {}  WHITE: {}",
            board.count(Side::Black),
            board.count(Side::White)
        )?;

        let hints = state
            .board_state()
            .in_progress()
            .filter(|game| game.show_moves() && state.is_local_turn());

        write!(f, "   ")?;
        for x in 0..BOARD_SIZE {
            write!(f, " {} ", x)?;
        }
        writeln!(f)?;

        for cell in Coordinate::all() {
            if cell.x() == 0 {
                write!(f, " {} ", cell.y())?;
            }
            let staged = state.pending_move() == Some(cell);
            let mark = match board.get(cell) {
                Some(Side::Black) if staged => "[X]",
                Some(Side::White) if staged => "[O]",
                Some(Side::Black) => " X ",
                Some(Side::White) => " O ",
                None if hints.is_some_and(|game| game.is_available(cell)) => " * ",
                None => " - ",
            };
            f.write_str(mark)?;
            if cell.x() == BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }

        if let Some(at) = state.pending_move() {
            writeln!(f, "Staged {}: commit or undo", at)?;
        }
        Ok(())
    }
}

/// Subscriber that prints the board after every change.
pub fn print_subscriber() -> impl FnMut(&AppState, &mut Dispatcher<Action>) + 'static {
    |state: &AppState, _: &mut Dispatcher<Action>| println!("\n{}", render(state))
}
