//! Core domain types for Othello.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 8;

/// Side of a stone, and of the player to move.
///
/// A board cell can only ever hold one of these two values. The "not yet
/// assigned" state of the local player is modeled as `Option<Side>` on the
/// session, never as a third side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// Black moves first.
    #[display("BLACK")]
    Black,
    /// White.
    #[display("WHITE")]
    White,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// A coordinate that fell outside the 8x8 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("coordinate ({x}, {y}) is outside the 8x8 board")]
pub struct CoordinateError {
    /// Requested column.
    pub x: i64,
    /// Requested row.
    pub y: i64,
}

/// A cell on the board, `x` is the column and `y` the row, both in `[0, 8)`.
///
/// On the wire a coordinate is `{"X": 2, "Y": 3}`. Deserialization rejects
/// out-of-range values, so a `Coordinate` is always on the board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(try_from = "WireCoordinate", into = "WireCoordinate")]
#[display("({x}, {y})")]
pub struct Coordinate {
    x: u8,
    y: u8,
}

#[derive(Serialize, Deserialize)]
struct WireCoordinate {
    #[serde(rename = "X")]
    x: i64,
    #[serde(rename = "Y")]
    y: i64,
}

impl TryFrom<WireCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(wire: WireCoordinate) -> Result<Self, Self::Error> {
        Coordinate::checked(wire.x, wire.y)
    }
}

impl From<Coordinate> for WireCoordinate {
    fn from(c: Coordinate) -> Self {
        Self {
            x: i64::from(c.x),
            y: i64::from(c.y),
        }
    }
}

impl Coordinate {
    /// Creates a coordinate, failing if it is off the board.
    pub fn new(x: u8, y: u8) -> Result<Self, CoordinateError> {
        Self::checked(i64::from(x), i64::from(y))
    }

    /// Creates a coordinate from signed components.
    pub fn checked(x: i64, y: i64) -> Result<Self, CoordinateError> {
        let size = i64::from(BOARD_SIZE);
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Ok(Self::unchecked(x as u8, y as u8))
        } else {
            Err(CoordinateError { x, y })
        }
    }

    pub(crate) const fn unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Column.
    pub fn x(self) -> u8 {
        self.x
    }

    /// Row.
    pub fn y(self) -> u8 {
        self.y
    }

    /// Bit index into a board mask (row-major).
    pub fn index(self) -> u32 {
        u32::from(self.y) * u32::from(BOARD_SIZE) + u32::from(self.x)
    }

    fn bit(self) -> u64 {
        1u64 << self.index()
    }

    /// Moves one cell in `direction`, or `None` when that leaves the board.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        Self::checked(i64::from(self.x) + dx, i64::from(self.y) + dy).ok()
    }

    /// The in-bounds 8-neighborhood, column offset outermost then row offset,
    /// each in the order -1, 0, 1.
    pub fn neighborhood(self) -> impl Iterator<Item = Coordinate> {
        const OFFSETS: [i64; 3] = [-1, 0, 1];
        OFFSETS.into_iter().flat_map(move |dx| {
            OFFSETS.into_iter().filter_map(move |dy| {
                if dx == 0 && dy == 0 {
                    return None;
                }
                Self::checked(i64::from(self.x) + dx, i64::from(self.y) + dy).ok()
            })
        })
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Self::unchecked(x, y)))
    }
}

/// One of the eight compass directions a capture ray can travel.
///
/// Rows grow downward, so `South` is `(0, 1)`. Iteration order is the order
/// in which rays are cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    /// (1, 0)
    East,
    /// (0, 1)
    South,
    /// (-1, 0)
    West,
    /// (0, -1)
    North,
    /// (1, 1)
    SouthEast,
    /// (-1, 1)
    SouthWest,
    /// (1, -1)
    NorthEast,
    /// (-1, -1)
    NorthWest,
}

impl Direction {
    /// Column and row offset of a single step.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// All eight directions in casting order.
    pub fn all() -> impl Iterator<Item = Direction> {
        Direction::iter()
    }
}

/// Stone occupancy of the 8x8 board.
///
/// Stored as one occupancy mask per side, so a board is a small `Copy`
/// value: applying a move produces a new board and leaves the old one intact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    black: u64,
    white: u64,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard starting position: White on (3, 3) and (4, 4), Black on
    /// (4, 3) and (3, 4).
    #[instrument]
    pub fn opening() -> Self {
        let mut board = Self::new();
        board.place(Coordinate::unchecked(3, 3), Side::White);
        board.place(Coordinate::unchecked(4, 4), Side::White);
        board.place(Coordinate::unchecked(4, 3), Side::Black);
        board.place(Coordinate::unchecked(3, 4), Side::Black);
        board
    }

    /// Builds a board from a list of stones. Later entries win.
    pub fn from_stones(stones: impl IntoIterator<Item = (Coordinate, Side)>) -> Self {
        let mut board = Self::new();
        for (at, side) in stones {
            board.place(at, side);
        }
        board
    }

    /// Returns the side occupying a cell, if any.
    pub fn get(&self, at: Coordinate) -> Option<Side> {
        let bit = at.bit();
        if self.black & bit != 0 {
            Some(Side::Black)
        } else if self.white & bit != 0 {
            Some(Side::White)
        } else {
            None
        }
    }

    /// Checks if a cell holds a stone.
    pub fn is_occupied(&self, at: Coordinate) -> bool {
        self.occupied_mask() & at.bit() != 0
    }

    /// Puts a stone of `side` on a cell, replacing whatever was there.
    pub fn place(&mut self, at: Coordinate, side: Side) {
        let bit = at.bit();
        match side {
            Side::Black => {
                self.black |= bit;
                self.white &= !bit;
            }
            Side::White => {
                self.white |= bit;
                self.black &= !bit;
            }
        }
    }

    /// Number of stones of `side`.
    pub fn count(&self, side: Side) -> u32 {
        self.mask(side).count_ones()
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> u32 {
        self.occupied_mask().count_ones()
    }

    /// Occupied cells with their side, in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Coordinate, Side)> + '_ {
        Coordinate::all().filter_map(|at| self.get(at).map(|side| (at, side)))
    }

    /// Occupancy mask of one side.
    pub fn mask(&self, side: Side) -> u64 {
        match side {
            Side::Black => self.black,
            Side::White => self.white,
        }
    }

    fn occupied_mask(&self) -> u64 {
        self.black | self.white
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        assert!(Coordinate::new(7, 7).is_ok());
        assert_eq!(
            Coordinate::new(8, 0),
            Err(CoordinateError { x: 8, y: 0 })
        );
        assert!(Coordinate::checked(-1, 3).is_err());
    }

    #[test]
    fn test_coordinate_wire_format() {
        let c = Coordinate::new(2, 3).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"X":2,"Y":3}"#);

        let parsed: Coordinate = serde_json::from_str(r#"{"X":5,"Y":4}"#).unwrap();
        assert_eq!(parsed, Coordinate::new(5, 4).unwrap());
    }

    #[test]
    fn test_out_of_range_wire_coordinate_rejected() {
        let parsed: Result<Coordinate, _> = serde_json::from_str(r#"{"X":9,"Y":0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_corner_neighborhood_is_clipped() {
        let corner = Coordinate::new(0, 0).unwrap();
        let neighbors: Vec<_> = corner.neighborhood().collect();
        assert_eq!(
            neighbors,
            vec![
                Coordinate::new(0, 1).unwrap(),
                Coordinate::new(1, 0).unwrap(),
                Coordinate::new(1, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn test_interior_neighborhood_order() {
        let center = Coordinate::new(2, 3).unwrap();
        let neighbors: Vec<_> = center.neighborhood().map(|c| (c.x(), c.y())).collect();
        assert_eq!(
            neighbors,
            vec![(1, 2), (1, 3), (1, 4), (2, 2), (2, 4), (3, 2), (3, 3), (3, 4)]
        );
    }

    #[test]
    fn test_step_off_board() {
        let edge = Coordinate::new(7, 0).unwrap();
        assert_eq!(edge.step(Direction::East), None);
        assert_eq!(edge.step(Direction::North), None);
        assert_eq!(edge.step(Direction::West), Coordinate::new(6, 0).ok());
    }

    #[test]
    fn test_opening_board() {
        let board = Board::opening();
        assert_eq!(board.count(Side::Black), 2);
        assert_eq!(board.count(Side::White), 2);
        assert_eq!(board.get(Coordinate::new(3, 3).unwrap()), Some(Side::White));
        assert_eq!(board.get(Coordinate::new(3, 4).unwrap()), Some(Side::Black));
        assert_eq!(board.get(Coordinate::new(0, 0).unwrap()), None);
    }

    #[test]
    fn test_place_replaces_other_side() {
        let at = Coordinate::new(1, 1).unwrap();
        let mut board = Board::new();
        board.place(at, Side::Black);
        board.place(at, Side::White);
        assert_eq!(board.get(at), Some(Side::White));
        assert_eq!(board.count(Side::Black), 0);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_side_wire_names() {
        assert_eq!(serde_json::to_string(&Side::Black).unwrap(), r#""BLACK""#);
        let side: Side = serde_json::from_str(r#""WHITE""#).unwrap();
        assert_eq!(side, Side::White);
        assert_eq!(Side::White.opponent(), Side::Black);
    }
}
