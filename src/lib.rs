//! Strictly Othello library - a client session for authoritative Othello
//!
//! Wraps the pure rules engine in a store, speaks the authority's JSON
//! protocol, and relays moves over newline-delimited streams.
//!
//! # Architecture
//!
//! - **Store**: dispatch/subscribe around the reducer, with queued
//!   follow-up dispatches
//! - **Session**: single entry point for local intents and remote frames
//! - **Protocol**: envelope decoding and move encoding
//! - **Relay**: tokio loop between the authority, the terminal, and a
//!   session
//!
//! # Example
//!
//! ```
//! use strictly_othello::GameSession;
//! use tokio::sync::mpsc::unbounded_channel;
//!
//! let (tx, mut rx) = unbounded_channel();
//! let mut session = GameSession::new(64, tx);
//! session.receive_raw(r#"{"EventType":"SIDE_ASSIGNED","Data":{"Side":"BLACK"}}"#);
//! session.receive_raw(r#"{"EventType":"INITIALIZED"}"#);
//! assert!(session.state().is_local_turn());
//! # let _ = rx.try_recv();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client_config;
mod command;
mod protocol;
mod relay;
mod render;
mod session;
mod store;

// Crate-level exports - Configuration
pub use client_config::{ClientConfig, ConfigError};

// Crate-level exports - Local commands
pub use command::{CommandError, LocalCommand};

// Crate-level exports - Wire protocol
pub use protocol::{decode, encode_move, EventType, ProtocolError, ProtocolErrorKind};

// Crate-level exports - Transport
pub use relay::{run as run_relay, RelayError, RelayExit};

// Crate-level exports - Rendering
pub use render::{print_subscriber, render};

// Crate-level exports - Session management
pub use session::{GameSession, SessionError};

// Crate-level exports - Store
pub use store::{Dispatcher, OthelloReducer, Reducer, Store, Subscriber};

// Crate-level exports - Game types
pub use strictly_othello_rules::{
    check_state, reduce, Action, AppState, Board, BoardState, Coordinate, FinishedBoard,
    Frontier, InProgressBoard, Outcome, Side,
};
