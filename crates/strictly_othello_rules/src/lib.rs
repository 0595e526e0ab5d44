//! Strictly Othello rules - the authoritative game-state engine
//!
//! Pure, deterministic Othello logic with no I/O.
//!
//! # Architecture
//!
//! - **Types**: coordinates, sides, and a two-mask bitboard
//! - **Rules**: ray-cast captures, the incremental frontier, move generation
//!   with the forced-pass rule
//! - **Phases**: `NotStarted` / `InProgress` / `Finished` board states
//! - **Reducer**: the single state machine driving previews, commits, and
//!   server confirmations
//! - **Contracts & invariants**: pre/postconditions and properties checked
//!   after every transition in debug builds
//!
//! # Example
//!
//! ```
//! use strictly_othello_rules::{reduce, Action, AppState, Coordinate, Side};
//!
//! let state = reduce(&AppState::new(), Action::AssignSide(Side::Black));
//! let state = reduce(&state, Action::Initialize);
//! let at = Coordinate::new(2, 3).unwrap();
//! let state = reduce(&state, Action::PreviewMove(at));
//! assert_eq!(state.pending_move(), Some(at));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod contracts;
pub mod invariants;
mod phases;
mod reducer;
pub mod rules;
mod state;
mod types;

// Crate-level exports - Core types
pub use types::{Board, Coordinate, CoordinateError, Direction, Side, BOARD_SIZE};

// Crate-level exports - Rules
pub use rules::{apply_move, captures, is_legal, legal_moves, next_turn, Frontier, NextTurn};

// Crate-level exports - Phases
pub use phases::{BoardState, FinishedBoard, InProgressBoard, MoveOutcome, Outcome};

// Crate-level exports - Actions and state
pub use action::Action;
pub use state::{
    AppState, EventLog, RollbackFull, RollbackStack, DEFAULT_EVENT_LOG_CAPACITY, MAX_STAGED_MOVES,
};

// Crate-level exports - State machine
pub use reducer::reduce;

// Crate-level exports - Contracts
pub use contracts::{assert_invariants, check_state, Contract, PreviewContract, StageError};
