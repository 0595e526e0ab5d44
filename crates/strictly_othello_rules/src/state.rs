//! Session snapshot owned by the state machine.

use super::action::Action;
use super::phases::BoardState;
use super::{Coordinate, Side};
use derive_more::{Display, Error};
use std::collections::VecDeque;
use tracing::instrument;

/// Most moves that may be staged before a commit round-trip resolves.
pub const MAX_STAGED_MOVES: usize = 1;

/// Default number of actions retained in the audit log.
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 512;

/// Append-only audit log of received actions, bounded to a fixed capacity.
///
/// When full, the oldest entry is dropped. The total number of actions ever
/// recorded is kept separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    entries: VecDeque<Action>,
    capacity: usize,
    total: u64,
}

impl EventLog {
    /// Creates an empty log retaining at most `capacity` actions.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_EVENT_LOG_CAPACITY)),
            capacity,
            total: 0,
        }
    }

    /// Appends an action, evicting the oldest if the log is full.
    pub fn record(&mut self, action: Action) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(action);
    }

    /// Retained actions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Action> + '_ {
        self.entries.iter()
    }

    /// Most recently recorded action.
    pub fn last(&self) -> Option<&Action> {
        self.entries.back()
    }

    /// Number of retained actions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of actions ever recorded, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total
    }

    /// Retention limit.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_LOG_CAPACITY)
    }
}

/// The rollback stack already holds [`MAX_STAGED_MOVES`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("rollback stack is full ({limit} staged move(s) allowed)")]
pub struct RollbackFull {
    /// The enforced limit.
    pub limit: usize,
}

/// Board states saved before each staged move, most recent on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollbackStack {
    entries: Vec<BoardState>,
}

impl RollbackStack {
    /// Saves a board state.
    ///
    /// # Errors
    ///
    /// Returns [`RollbackFull`] if [`MAX_STAGED_MOVES`] states are already
    /// saved.
    pub fn push(&mut self, state: BoardState) -> Result<(), RollbackFull> {
        if self.entries.len() >= MAX_STAGED_MOVES {
            return Err(RollbackFull {
                limit: MAX_STAGED_MOVES,
            });
        }
        self.entries.push(state);
        Ok(())
    }

    /// Removes and returns the most recently saved state.
    pub fn pop(&mut self) -> Option<BoardState> {
        self.entries.pop()
    }

    /// Most recently saved state.
    pub fn peek(&self) -> Option<&BoardState> {
        self.entries.last()
    }

    /// Discards every saved state.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of saved states.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable snapshot of a player's session.
///
/// Every [`reduce`](crate::reduce) call returns a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub(crate) side: Option<Side>,
    pub(crate) is_committing: bool,
    pub(crate) board_state: BoardState,
    pub(crate) events: EventLog,
    pub(crate) rollback: RollbackStack,
    pub(crate) undo_count: usize,
    pub(crate) pending_move: Option<Coordinate>,
}

impl AppState {
    /// Creates the initial snapshot: no side, no board.
    #[instrument]
    pub fn new() -> Self {
        Self::with_log_capacity(DEFAULT_EVENT_LOG_CAPACITY)
    }

    /// Creates the initial snapshot with a custom audit log capacity.
    #[instrument]
    pub fn with_log_capacity(capacity: usize) -> Self {
        Self {
            side: None,
            is_committing: false,
            board_state: BoardState::NotStarted,
            events: EventLog::new(capacity),
            rollback: RollbackStack::default(),
            undo_count: 0,
            pending_move: None,
        }
    }

    /// Side assigned to the local player, `None` until paired.
    pub fn side(&self) -> Option<Side> {
        self.side
    }

    /// Whether a commit round-trip is in flight.
    pub fn is_committing(&self) -> bool {
        self.is_committing
    }

    /// Current board state.
    pub fn board_state(&self) -> &BoardState {
        &self.board_state
    }

    /// Audit log of received actions.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Saved pre-stage board states.
    pub fn rollback(&self) -> &RollbackStack {
        &self.rollback
    }

    /// Number of staged moves that can be undone.
    pub fn undo_count(&self) -> usize {
        self.undo_count
    }

    /// The staged, unconfirmed move.
    pub fn pending_move(&self) -> Option<Coordinate> {
        self.pending_move
    }

    /// Checks whether it is the local player's turn.
    pub fn is_local_turn(&self) -> bool {
        match (self.side, self.board_state.in_progress()) {
            (Some(side), Some(game)) => game.player_turn() == side,
            _ => false,
        }
    }

    /// Compares two snapshots ignoring the audit log.
    ///
    /// Every action is logged, so plain equality never holds across a
    /// dispatch; this tells whether the action changed the game.
    pub fn same_game(&self, other: &AppState) -> bool {
        self.side == other.side
            && self.is_committing == other.is_committing
            && self.board_state == other.board_state
            && self.rollback == other.rollback
            && self.undo_count == other.undo_count
            && self.pending_move == other.pending_move
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
