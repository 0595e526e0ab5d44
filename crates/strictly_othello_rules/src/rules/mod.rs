//! Game rules for Othello.
//!
//! Pure functions over [`Board`](crate::Board) values: capture detection,
//! frontier maintenance and move generation. Nothing here knows about the
//! session or the stage/commit protocol.

pub mod capture;
pub mod frontier;
pub mod moves;

pub use capture::{apply_move, captures, is_legal};
pub use frontier::Frontier;
pub use moves::{legal_moves, next_turn, NextTurn};
