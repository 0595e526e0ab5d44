//! Incremental tracking of the frontier: empty cells touching a stone.

use super::super::{Board, Coordinate};
use tracing::instrument;

/// Cells of the opening frontier, in the order they are listed to players.
const OPENING_FRONTIER: [(u8, u8); 12] = [
    (2, 2),
    (2, 3),
    (2, 4),
    (2, 5),
    (5, 2),
    (5, 3),
    (5, 4),
    (5, 5),
    (3, 2),
    (4, 2),
    (3, 5),
    (4, 5),
];

/// Ordered set of empty cells adjacent (8-neighborhood) to an occupied cell.
///
/// Only frontier cells are ever considered as move candidates. Order is
/// insertion order and decides the order of move listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    cells: Vec<Coordinate>,
    mask: u64,
}

impl Frontier {
    /// Creates an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frontier of [`Board::opening`].
    pub fn opening() -> Self {
        let mut frontier = Self::new();
        for (x, y) in OPENING_FRONTIER {
            frontier.push(Coordinate::unchecked(x, y));
        }
        frontier
    }

    /// Builds the frontier of an arbitrary board by scanning every stone
    /// in row-major order.
    #[instrument(skip(board))]
    pub fn scan(board: &Board) -> Self {
        let mut frontier = Self::new();
        for (stone, _) in board.stones() {
            frontier.extend_around(board, stone);
        }
        frontier
    }

    /// Returns the frontier after a stone was played on `played`.
    ///
    /// `board` is the board after the move. Only the neighborhood of the
    /// played cell is examined.
    #[instrument(skip(self, board), fields(played = %played))]
    pub fn advance(&self, board: &Board, played: Coordinate) -> Self {
        let mut next = Self::new();
        for &cell in self.cells.iter().filter(|cell| **cell != played) {
            next.push(cell);
        }
        next.extend_around(board, played);
        next
    }

    /// Checks frontier membership in constant time.
    pub fn contains(&self, at: Coordinate) -> bool {
        self.mask & (1u64 << at.index()) != 0
    }

    /// Frontier cells in order.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Iterates frontier cells in order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.iter().copied()
    }

    /// Number of frontier cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Checks if the frontier is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn extend_around(&mut self, board: &Board, stone: Coordinate) {
        for neighbor in stone.neighborhood() {
            if !board.is_occupied(neighbor) && !self.contains(neighbor) {
                self.push(neighbor);
            }
        }
    }

    fn push(&mut self, at: Coordinate) {
        self.mask |= 1u64 << at.index();
        self.cells.push(at);
    }
}
