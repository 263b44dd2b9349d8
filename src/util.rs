//! Core geometry utilities

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};


/// Position of a single cell
///
/// The column `x` counts from `0` for the leftmost column, the row `y` counts
/// from `0` for the top row. Positions are not bound to a specific board.
/// Whether a position lies within a board is decided by the board.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Create a new position
    ///
    pub const fn new(x: usize, y: usize) -> Self {
        Self {x, y}
    }

    /// Offset the position by a signed delta
    ///
    /// If either coordinate would become negative, this function returns
    /// `None`.
    ///
    pub fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        Some(Self {x: add_signed(self.x, dx)?, y: add_signed(self.y, dy)?})
    }

    /// Translate this position by another one, used as an offset
    ///
    /// Coordinates saturate at `usize::MAX`, which lies outside of any grid.
    ///
    pub fn saturating_add(self, offset: Self) -> Self {
        Self {x: self.x.saturating_add(offset.x), y: self.y.saturating_add(offset.y)}
    }

    /// Compute the signed delta leading from this position to `other`
    ///
    pub fn delta_to(self, other: Self) -> (isize, isize) {
        (other.x as isize - self.x as isize, other.y as isize - self.y as isize)
    }
}

impl std::ops::Add<Direction> for Position {
    type Output = Option<Position>;

    fn add(self, dir: Direction) -> Self::Output {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn add_signed(value: usize, delta: isize) -> Option<usize> {
    if delta < 0 {
        value.checked_sub(delta.unsigned_abs())
    } else {
        value.checked_add(delta as usize)
    }
}


/// Direction of a slide
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in clockwise order starting with `Up`
    ///
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Retrieve the unit delta associated with this direction
    ///
    /// `Up` decreases `y`, `Left` decreases `x`.
    ///
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::Up    => (0, -1),
            Self::Down  => (0, 1),
            Self::Left  => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Retrieve the opposite direction
    ///
    pub fn opposite(self) -> Self {
        self.rotated_cw().rotated_cw()
    }

    /// Retrieve the direction rotated clockwise
    ///
    pub fn rotated_cw(self) -> Self {
        match self {
            Self::Up    => Self::Right,
            Self::Right => Self::Down,
            Self::Down  => Self::Left,
            Self::Left  => Self::Up,
        }
    }

    /// Retrieve the direction rotated counterclockwise
    ///
    pub fn rotated_ccw(self) -> Self {
        match self {
            Self::Up    => Self::Left,
            Self::Left  => Self::Down,
            Self::Down  => Self::Right,
            Self::Right => Self::Up,
        }
    }

    /// Determine the direction of a signed delta
    ///
    /// Only axis-aligned, non-zero deltas have a direction.
    ///
    pub fn of_delta(dx: isize, dy: isize) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (0, -1) => Some(Self::Up),
            (0, 1)  => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0)  => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up    => "up",
            Self::Down  => "down",
            Self::Left  => "left",
            Self::Right => "right",
        };
        fmt::Display::fmt(name, f)
    }
}

impl FromStr for Direction {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up"    | "u" => Ok(Self::Up),
            "down"  | "d" => Ok(Self::Down),
            "left"  | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}


/// Error type indicating an unparsable direction
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl Error for UnknownDirection {}

impl fmt::Display for UnknownDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown direction '{}'", self.0)
    }
}


/// Rectangular region of cells
///
/// Both corners are inclusive.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    top_left: Position,
    bottom_right: Position,
}

impl Region {
    /// Create the smallest region containing both positions
    ///
    pub fn spanning(a: Position, b: Position) -> Self {
        Self {
            top_left: Position::new(a.x.min(b.x), a.y.min(b.y)),
            bottom_right: Position::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Retrieve the top left corner
    ///
    pub fn top_left(&self) -> Position {
        self.top_left
    }

    /// Retrieve the bottom right corner
    ///
    pub fn bottom_right(&self) -> Position {
        self.bottom_right
    }

    /// Retrieve the number of columns covered
    ///
    pub fn width(&self) -> usize {
        self.bottom_right.x - self.top_left.x + 1
    }

    /// Retrieve the number of rows covered
    ///
    pub fn height(&self) -> usize {
        self.bottom_right.y - self.top_left.y + 1
    }

    /// Check whether the given position lies within the region
    ///
    pub fn contains(&self, pos: Position) -> bool {
        (self.top_left.x..=self.bottom_right.x).contains(&pos.x) &&
            (self.top_left.y..=self.bottom_right.y).contains(&pos.y)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.top_left, self.bottom_right)
    }
}


#[cfg(test)]
impl Arbitrary for Position {
    fn arbitrary(g: &mut Gen) -> Self {
        Self::new(u8::arbitrary(g).into(), u8::arbitrary(g).into())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let res = (self.x, self.y).shrink().map(|(x, y)| Self::new(x, y));
        Box::new(res)
    }
}

#[cfg(test)]
impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Self::ALL).unwrap()
    }
}
