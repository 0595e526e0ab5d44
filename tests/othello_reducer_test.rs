//! Tests for the Othello stage/commit state machine.

use strictly_othello::{check_state, reduce, Action, AppState, BoardState, Coordinate, Side};

fn c(x: u8, y: u8) -> Coordinate {
    Coordinate::new(x, y).unwrap()
}

fn started() -> AppState {
    let state = reduce(&AppState::new(), Action::AssignSide(Side::Black));
    reduce(&state, Action::Initialize)
}

#[test]
fn test_initialize_sets_opening() {
    let state = started();
    let game = state.board_state().in_progress().expect("game should be running");

    assert_eq!(game.player_turn(), Side::Black);
    assert_eq!(game.frontier().len(), 12);
    assert_eq!(game.available_moves(), &[c(2, 3), c(5, 4), c(3, 2), c(4, 5)]);
    assert!(game.show_moves());
    assert!(state.is_local_turn());
}

#[test]
fn test_preview_flips_one_and_extends_frontier() {
    let state = reduce(&started(), Action::PreviewMove(c(2, 3)));
    let game = state.board_state().in_progress().unwrap();

    assert_eq!(game.board().get(c(3, 3)), Some(Side::Black));
    assert_eq!(game.board().count(Side::Black), 4);
    assert_eq!(game.board().count(Side::White), 1);

    for exposed in [c(1, 2), c(1, 3), c(1, 4)] {
        assert!(game.frontier().contains(exposed), "{} should be on the frontier", exposed);
    }
    assert!(!game.frontier().contains(c(2, 3)));

    assert_eq!(game.player_turn(), Side::White);
    assert_eq!(game.available_moves(), &[c(2, 2), c(2, 4), c(4, 2)]);
    assert_eq!(state.undo_count(), 1);
    assert_eq!(state.pending_move(), Some(c(2, 3)));
}

#[test]
fn test_preview_then_undo_round_trips() {
    let before = started();
    let staged = reduce(&before, Action::PreviewMove(c(5, 4)));
    let undone = reduce(&staged, Action::Undo);

    assert_eq!(undone.board_state(), before.board_state());
    assert_eq!(undone.undo_count(), 0);
    assert_eq!(undone.pending_move(), None);
    assert!(undone.rollback().is_empty());
}

#[test]
fn test_undo_with_nothing_staged_is_noop() {
    let state = started();
    let after = reduce(&state, Action::Undo);
    assert!(after.same_game(&state));
    assert_eq!(after.events().len(), state.events().len() + 1);
}

#[test]
fn test_second_preview_is_refused() {
    let staged = reduce(&started(), Action::PreviewMove(c(2, 3)));
    let again = reduce(&staged, Action::PreviewMove(c(2, 2)));
    assert!(again.same_game(&staged));
    assert_eq!(again.undo_count(), 1);
}

#[test]
fn test_illegal_preview_is_refused() {
    let state = started();
    let after = reduce(&state, Action::PreviewMove(c(0, 0)));
    assert!(after.same_game(&state));
}

#[test]
fn test_commit_then_accept_clears_rollback() {
    let staged = reduce(&started(), Action::PreviewMove(c(2, 3)));
    let committing = reduce(&staged, Action::Commit);
    let accepted = reduce(&committing, Action::MoveAccepted);

    assert!(!accepted.is_committing());
    assert!(accepted.rollback().is_empty());
    assert_eq!(accepted.undo_count(), 0);
    assert_eq!(accepted.pending_move(), None);
    assert_eq!(accepted.board_state(), staged.board_state());
}

#[test]
fn test_commit_then_reject_restores_board() {
    let before = started();
    let staged = reduce(&before, Action::PreviewMove(c(3, 2)));
    let committing = reduce(&staged, Action::Commit);
    let rejected = reduce(&committing, Action::MoveRejected);

    assert_eq!(rejected.board_state(), before.board_state());
    assert_eq!(rejected.undo_count(), 0);
    assert!(!rejected.is_committing());
}

#[test]
fn test_every_action_is_logged() {
    let actions = [
        Action::AssignSide(Side::White),
        Action::Initialize,
        Action::Undo,
        Action::Moved(c(2, 3)),
        Action::HideMoves,
    ];
    let mut state = AppState::new();
    for action in actions {
        state = reduce(&state, action);
    }
    assert_eq!(state.events().iter().copied().collect::<Vec<_>>(), actions);
    assert_eq!(state.events().total_recorded(), 5);
}

#[test]
fn test_event_log_is_bounded() {
    let mut state = reduce(&AppState::with_log_capacity(3), Action::Initialize);
    for _ in 0..10 {
        state = reduce(&state, Action::ShowMoves);
    }
    assert_eq!(state.events().len(), 3);
    assert_eq!(state.events().total_recorded(), 11);
}

#[test]
fn test_trusted_moves_play_to_completion() {
    let mut state = started();
    let mut moves = 0;

    while let BoardState::InProgress(game) = state.board_state() {
        let next = *game
            .available_moves()
            .first()
            .expect("a running game always has a move");
        state = reduce(&state, Action::Moved(next));
        assert!(check_state(&state).is_ok(), "invariants broken after {}", next);
        moves += 1;
        assert!(moves <= 60, "game should end once the board fills");
    }

    let BoardState::Finished(game) = state.board_state() else {
        panic!("game should be finished");
    };
    let (black, white) = game.score();
    assert_eq!(black + white, game.board().occupied_count());
    assert_eq!(game.outcome().is_draw(), black == white);
}
