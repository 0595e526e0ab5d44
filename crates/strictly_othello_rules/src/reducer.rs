//! The game state machine.
//!
//! [`reduce`] is the single dispatch boundary: it takes a snapshot and an
//! action and returns the next snapshot. Actions that do not apply in the
//! current phase are no-ops; they are still recorded in the audit log.

use super::contracts::{assert_invariants, Contract, PreviewContract};
use super::phases::{BoardState, InProgressBoard, MoveOutcome};
use super::{Action, AppState, Coordinate, Side};
use tracing::{debug, info, instrument, warn};

/// Computes the snapshot that follows `action`.
///
/// Pure: the input snapshot is left untouched and no I/O happens.
#[instrument(skip(state), fields(action = %action, phase = state.board_state().phase()))]
pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    next.events.record(action);

    let next = match action {
        Action::AssignSide(side) => assign_side(next, side),
        Action::Initialize => initialize(next),
        _ if matches!(next.board_state, BoardState::InProgress(_)) => in_progress(next, action),
        _ => {
            debug!("Action ignored outside a running game");
            next
        }
    };

    assert_invariants(&next);
    next
}

fn assign_side(mut state: AppState, side: Side) -> AppState {
    info!(side = %side, "Side assigned");
    state.side = Some(side);
    state
}

fn initialize(mut state: AppState) -> AppState {
    if !matches!(state.board_state, BoardState::NotStarted) {
        debug!("Game already initialized");
        return state;
    }
    let game = InProgressBoard::opening();
    info!(
        to_move = %game.player_turn(),
        moves = game.available_moves().len(),
        "Game initialized"
    );
    state.board_state = BoardState::InProgress(game);
    state
}

fn in_progress(state: AppState, action: Action) -> AppState {
    match action {
        Action::Moved(at) => moved(state, at),
        Action::ShowMoves => set_show_moves(state, true),
        Action::HideMoves => set_show_moves(state, false),
        Action::PreviewMove(at) => preview(state, at),
        Action::Undo => undo(state),
        Action::Commit => commit(state),
        Action::MoveAccepted => accept(state),
        Action::MoveRejected => reject(state),
        Action::AssignSide(_) | Action::Initialize => state,
    }
}

fn moved(mut state: AppState, at: Coordinate) -> AppState {
    let BoardState::InProgress(game) = &state.board_state else {
        return state;
    };
    if !game.is_available(at) {
        warn!(at = %at, to_move = %game.player_turn(), "Applying trusted move that is not listed as legal");
    }

    state.board_state = match game.play(at) {
        MoveOutcome::Continues(game) => BoardState::InProgress(game),
        MoveOutcome::Exhausted(game) => finish(game),
    };
    state
}

fn set_show_moves(mut state: AppState, show: bool) -> AppState {
    if let BoardState::InProgress(game) = &mut state.board_state {
        game.show_moves = show;
    }
    state
}

fn preview(mut state: AppState, at: Coordinate) -> AppState {
    if let Err(error) = PreviewContract::pre(&state, &at) {
        debug!(%error, "Preview rejected");
        return state;
    }
    let BoardState::InProgress(game) = &state.board_state else {
        return state;
    };

    #[cfg(debug_assertions)]
    let snapshot = state.clone();
    let staged = BoardState::InProgress(game.play(at).into_board());
    let before = std::mem::replace(&mut state.board_state, staged);
    if let Err(error) = state.rollback.push(before.clone()) {
        warn!(%error, "Refusing to stage move");
        state.board_state = before;
        return state;
    }
    state.undo_count += 1;
    state.pending_move = Some(at);
    debug!(undo_count = state.undo_count, "Move staged");

    #[cfg(debug_assertions)]
    if let Err(error) = PreviewContract::post(&snapshot, &state) {
        warn!(%error, "Staged state failed postconditions");
    }

    state
}

fn undo(mut state: AppState) -> AppState {
    if state.undo_count == 0 {
        debug!("Nothing to undo");
        return state;
    }
    match state.rollback.pop() {
        Some(restored) => {
            state.board_state = restored;
            state.undo_count -= 1;
            state.pending_move = None;
            debug!(undo_count = state.undo_count, "Staged move undone");
        }
        None => warn!(undo_count = state.undo_count, "Undo count set but rollback stack is empty"),
    }
    state
}

fn commit(mut state: AppState) -> AppState {
    debug!(pending = ?state.pending_move, "Commit in flight");
    state.is_committing = true;
    state
}

fn accept(mut state: AppState) -> AppState {
    info!(pending = ?state.pending_move, "Move accepted");
    state.is_committing = false;
    state.rollback.clear();
    state.undo_count = 0;
    state.pending_move = None;

    if let BoardState::InProgress(game) = &state.board_state
        && game.is_exhausted()
    {
        state.board_state = finish(game.clone());
    }
    state
}

fn reject(mut state: AppState) -> AppState {
    if !state.is_committing {
        debug!("Rejection without a commit in flight");
        return state;
    }
    state.is_committing = false;
    match state.rollback.pop() {
        Some(restored) => {
            state.board_state = restored;
            state.undo_count = state.undo_count.saturating_sub(1);
            state.pending_move = None;
            info!(undo_count = state.undo_count, "Move rejected, staged move rolled back");
        }
        None => warn!("Move rejected but nothing was staged"),
    }
    state
}

fn finish(game: InProgressBoard) -> BoardState {
    let finished = game.finish();
    let (black, white) = finished.score();
    info!(outcome = %finished.outcome(), black, white, "Game finished");
    BoardState::Finished(finished)
}
