//! First-class action types for the game state machine.
//!
//! Actions are domain events, not side effects. Local intents (preview,
//! undo, hint toggles, commit) and remote notifications (side assignment,
//! initialization, moves, accept/reject) share one type and one dispatch
//! entry point.

use super::{Coordinate, Side};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

/// An input to [`reduce`](crate::reduce).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "actionType", content = "data", rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// The remote authority assigned the local player a side.
    AssignSide(Side),
    /// The remote authority started the game.
    Initialize,
    /// A move was made and confirmed by the remote authority.
    Moved(Coordinate),
    /// Show legal-move hints.
    ShowMoves,
    /// Hide legal-move hints.
    HideMoves,
    /// Stage a local move without committing it.
    PreviewMove(Coordinate),
    /// Roll back the staged move.
    Undo,
    /// The staged move was sent to the remote authority.
    Commit,
    /// The remote authority accepted the staged move.
    MoveAccepted,
    /// The remote authority refused the staged move.
    MoveRejected,
}

impl Action {
    /// Returns the action's wire name, e.g. `PREVIEW_MOVE`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Checks if this action originates from the local player rather than
    /// the remote authority.
    pub fn is_local_intent(&self) -> bool {
        matches!(
            self,
            Action::ShowMoves
                | Action::HideMoves
                | Action::PreviewMove(_)
                | Action::Undo
                | Action::Commit
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::AssignSide(side) => write!(f, "{} {}", self.kind(), side),
            Action::Moved(at) | Action::PreviewMove(at) => write!(f, "{} {}", self.kind(), at),
            _ => f.write_str(self.kind()),
        }
    }
}
