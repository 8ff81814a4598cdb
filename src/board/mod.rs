//! Board representation and hex geometry for Cachex
//!
//! Cells live on an n×n rhombus addressed by `(r, q)`. Adjacency and the
//! capture patterns are computed in axial coordinates `(r, q, s)` with
//! `s = -r - q`, which are derived on demand and never stored.

pub mod bitboard;
pub mod board;


use std::fmt;
use std::ops::{Add, Sub};

// Re-exports
pub use bitboard::Bitboard;
pub use board::Board;

/// Largest supported board edge
pub const MAX_BOARD_SIZE: u8 = 32;

/// Hex neighbour offsets `(dr, dq)`.
///
/// Every ordered pair of two distinct values from {-1, 0, 1}; the order is
/// fixed so capture enumeration is deterministic.
pub const HEX_DIRECTIONS: [(i8, i8); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// The two sides. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    #[inline]
    pub fn is_first(self) -> bool {
        self == Player::Red
    }

    /// Axis whose two edges this player must link.
    ///
    /// Red links row 0 to row n-1, Blue links column 0 to column n-1.
    #[inline]
    pub fn connecting_axis(self) -> Axis {
        match self {
            Player::Red => Axis::Row,
            Player::Blue => Axis::Column,
        }
    }

    /// The axis across the connecting direction.
    #[inline]
    pub fn lateral_axis(self) -> Axis {
        match self {
            Player::Red => Axis::Column,
            Player::Blue => Axis::Row,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => f.write_str("red"),
            Player::Blue => f.write_str("blue"),
        }
    }
}

/// Board axis used by the evaluation features
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    /// Component of `coord` along this axis
    #[inline]
    pub fn of(self, coord: Coord) -> u8 {
        match self {
            Axis::Row => coord.r,
            Axis::Column => coord.q,
        }
    }
}

/// Cell on the board. Orders by row, then column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub r: u8,
    pub q: u8,
}

impl Coord {
    #[inline]
    pub const fn new(r: u8, q: u8) -> Self {
        Self { r, q }
    }

    #[inline]
    pub fn to_index(self, size: u8) -> usize {
        self.r as usize * size as usize + self.q as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: u8) -> Self {
        Self {
            r: (idx / size as usize) as u8,
            q: (idx % size as usize) as u8,
        }
    }

    /// `0 <= r < size` and `0 <= q < size`
    #[inline]
    pub fn in_bounds(r: i32, q: i32, size: u8) -> bool {
        r >= 0 && r < i32::from(size) && q >= 0 && q < i32::from(size)
    }

    /// Build a coordinate from signed components, `None` when off the board.
    #[inline]
    pub fn checked(r: i32, q: i32, size: u8) -> Option<Coord> {
        if Self::in_bounds(r, q, size) {
            Some(Coord::new(r as u8, q as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn axial(self) -> Axial {
        Axial::new(i32::from(self.r), i32::from(self.q))
    }

    /// Reflection across the main diagonal, used by the steal rule.
    #[inline]
    pub fn mirror(self) -> Coord {
        Coord::new(self.q, self.r)
    }

    /// In-bounds neighbours in `HEX_DIRECTIONS` order.
    pub fn neighbours(self, size: u8) -> impl Iterator<Item = Coord> {
        let origin = self.axial();
        origin
            .neighbours()
            .into_iter()
            .filter_map(move |n| n.to_coord(size))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.q)
    }
}

/// Cube-style axial coordinate with the invariant `r + q + s == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Axial {
    pub r: i32,
    pub q: i32,
    pub s: i32,
}

impl Axial {
    #[inline]
    pub const fn new(r: i32, q: i32) -> Self {
        Self { r, q, s: -r - q }
    }

    /// Rotate the components once: `(x, y, z) -> (y, z, x)`.
    ///
    /// Applied to a unit offset this turns it 120° around the origin.
    #[inline]
    pub const fn rotate(self) -> Self {
        Self {
            r: self.q,
            q: self.s,
            s: self.r,
        }
    }

    /// Hex distance from the origin
    #[inline]
    pub fn length(self) -> i32 {
        (self.r.abs() + self.q.abs() + self.s.abs()) / 2
    }

    #[inline]
    pub fn distance(self, other: Axial) -> i32 {
        (self - other).length()
    }

    /// All six neighbours, including those that fall off any board.
    pub fn neighbours(self) -> [Axial; 6] {
        HEX_DIRECTIONS.map(|(dr, dq)| self + Axial::new(i32::from(dr), i32::from(dq)))
    }

    /// Project back to 2-D, `None` when off the board.
    #[inline]
    pub fn to_coord(self, size: u8) -> Option<Coord> {
        Coord::checked(self.r, self.q, size)
    }
}

impl Add for Axial {
    type Output = Axial;

    #[inline]
    fn add(self, rhs: Axial) -> Axial {
        Axial {
            r: self.r + rhs.r,
            q: self.q + rhs.q,
            s: self.s + rhs.s,
        }
    }
}

impl Sub for Axial {
    type Output = Axial;

    #[inline]
    fn sub(self, rhs: Axial) -> Axial {
        Axial {
            r: self.r - rhs.r,
            q: self.q - rhs.q,
            s: self.s - rhs.s,
        }
    }
}

impl From<Coord> for Axial {
    fn from(coord: Coord) -> Self {
        coord.axial()
    }
}
