//! A player's session against a remote authority.

use crate::command::LocalCommand;
use crate::protocol::{decode, encode_move, ProtocolError};
use crate::store::{Dispatcher, OthelloReducer, Store};
use strictly_othello_rules::{Action, AppState, Coordinate};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

/// Why a local intent was refused before reaching the state machine.
#[derive(Debug, Clone, derive_more::Display, derive_more::From)]
pub enum SessionError {
    /// Commit was requested with nothing staged.
    #[display("No move is staged")]
    NothingStaged,

    /// A commit is already waiting for the authority's answer.
    #[display("A commit is already in flight")]
    CommitInFlight,

    /// The local player does not have the move.
    #[display("It is not your turn")]
    NotYourTurn,

    /// The outbound connection is gone.
    #[display("Outbound channel closed")]
    OutboundClosed,

    /// The move could not be encoded.
    #[display("{}", _0)]
    #[from]
    Protocol(ProtocolError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Protocol(err) => Some(err),
            _ => None,
        }
    }
}

/// Binds a store to the outbound move channel.
///
/// Every input, local or remote, goes through [`Store::dispatch`], one at a
/// time.
pub struct GameSession {
    store: Store<OthelloReducer>,
    outbound: UnboundedSender<String>,
}

impl GameSession {
    /// Creates a session whose audit log keeps `event_log_capacity` actions.
    #[instrument(skip(outbound))]
    pub fn new(event_log_capacity: usize, outbound: UnboundedSender<String>) -> Self {
        info!("Creating new game session");
        Self {
            store: Store::new(AppState::with_log_capacity(event_log_capacity)),
            outbound,
        }
    }

    /// Registers a subscriber on the underlying store.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&AppState, &mut Dispatcher<Action>) + 'static,
    {
        self.store.subscribe(subscriber);
    }

    /// Current snapshot.
    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    /// Decodes and dispatches one inbound frame.
    ///
    /// Malformed frames are logged and dropped. Returns `true` if an action
    /// was dispatched.
    #[instrument(skip(self, raw))]
    pub fn receive_raw(&mut self, raw: &str) -> bool {
        match decode(raw) {
            Ok(Some(action)) => {
                self.receive(action);
                true
            }
            Ok(None) => {
                debug!("Frame carried nothing to dispatch");
                false
            }
            Err(error) => {
                warn!(%error, frame = %raw, "Dropping malformed frame");
                false
            }
        }
    }

    /// Dispatches a remote notification.
    pub fn receive(&mut self, action: Action) {
        if action.is_local_intent() {
            warn!(action = %action, "Local intent arrived from the authority");
        }
        self.store.dispatch(action);
    }

    /// Stages a move.
    ///
    /// Staging an illegal cell, or a second move, is left to the state
    /// machine and leaves the state unchanged.
    #[instrument(skip(self), fields(at = %at))]
    pub fn preview(&mut self, at: Coordinate) -> Result<(), SessionError> {
        if !self.state().is_local_turn() {
            return Err(SessionError::NotYourTurn);
        }
        self.store.dispatch(Action::PreviewMove(at));
        Ok(())
    }

    /// Rolls back the staged move.
    pub fn undo(&mut self) {
        self.store.dispatch(Action::Undo);
    }

    /// Turns legal-move hints on or off.
    pub fn set_show_moves(&mut self, show: bool) {
        let action = if show {
            Action::ShowMoves
        } else {
            Action::HideMoves
        };
        self.store.dispatch(action);
    }

    /// Sends the staged move to the authority, then marks the commit as in
    /// flight.
    #[instrument(skip(self))]
    pub fn commit(&mut self) -> Result<(), SessionError> {
        if self.state().is_committing() {
            return Err(SessionError::CommitInFlight);
        }
        let Some(at) = self.state().pending_move() else {
            return Err(SessionError::NothingStaged);
        };

        let frame = encode_move(at)?;
        self.outbound
            .send(frame)
            .map_err(|_| SessionError::OutboundClosed)?;
        info!(at = %at, "Move sent to authority");

        self.store.dispatch(Action::Commit);
        Ok(())
    }

    /// Applies a local command. [`LocalCommand::Quit`] is a no-op here; the
    /// caller decides when to stop.
    pub fn apply(&mut self, command: LocalCommand) -> Result<(), SessionError> {
        match command {
            LocalCommand::Preview(at) => self.preview(at),
            LocalCommand::Undo => {
                self.undo();
                Ok(())
            }
            LocalCommand::Commit => self.commit(),
            LocalCommand::Show => {
                self.set_show_moves(true);
                Ok(())
            }
            LocalCommand::Hide => {
                self.set_show_moves(false);
                Ok(())
            }
            LocalCommand::Quit => Ok(()),
        }
    }
}
