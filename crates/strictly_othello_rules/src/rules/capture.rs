//! Ray-cast capture detection and move application.

use super::super::{Board, Coordinate, Direction, Side};
use tracing::instrument;

/// Computes every stone that flips when `mover` places on `at`.
///
/// Rays are cast in [`Direction`] order. A ray collects consecutive opponent
/// stones and keeps them only if it then reaches a stone of `mover`; an empty
/// cell or the board edge discards it. An empty result means the move is
/// illegal.
#[instrument(skip(board), fields(mover = %mover, at = %at))]
pub fn captures(board: &Board, mover: Side, at: Coordinate) -> Vec<Coordinate> {
    Direction::all()
        .flat_map(|direction| ray(board, mover, at, direction))
        .collect()
}

/// Checks whether placing `mover` on `at` flips at least one stone.
pub fn is_legal(board: &Board, mover: Side, at: Coordinate) -> bool {
    Direction::all().any(|direction| !ray(board, mover, at, direction).is_empty())
}

/// Places a stone and flips the captured run, returning the new board.
///
/// The move is not validated: a placement with nothing to flip still
/// places the stone.
#[instrument(skip(board), fields(mover = %mover, at = %at))]
pub fn apply_move(board: &Board, mover: Side, at: Coordinate) -> Board {
    let flips = captures(board, mover, at);
    let mut next = *board;
    next.place(at, mover);
    for cell in flips {
        next.place(cell, mover);
    }
    next
}

fn ray(board: &Board, mover: Side, at: Coordinate, direction: Direction) -> Vec<Coordinate> {
    let opponent = mover.opponent();
    let mut run = Vec::new();
    let mut current = at;

    while let Some(next) = current.step(direction) {
        match board.get(next) {
            Some(side) if side == opponent => run.push(next),
            Some(_) => return run,
            None => break,
        }
        current = next;
    }

    Vec::new()
}
