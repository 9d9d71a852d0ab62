//! Face turns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{notation, CubeError, Face};

/// Turn direction as seen when looking straight at the turned face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Clockwise.
    Clockwise,
    /// Counter-clockwise (the `'` suffix).
    CounterClockwise,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// How far a face is turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amount {
    /// 90 degrees.
    Quarter,
    /// 180 degrees (the `2` suffix).
    Half,
}

/// A single face turn such as `R`, `U'` or `F2`.
///
/// Half turns are normalised to [`Direction::Clockwise`] on construction, so
/// `R2` compares equal however it was built. A `Move` serialises as its
/// notation token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Move {
    face: Face,
    amount: Amount,
    direction: Direction,
}

impl Move {
    /// Create a move, normalising the direction of half turns.
    pub fn new(face: Face, amount: Amount, direction: Direction) -> Self {
        let direction = match amount {
            Amount::Half => Direction::Clockwise,
            Amount::Quarter => direction,
        };
        Self {
            face,
            amount,
            direction,
        }
    }

    /// Clockwise quarter turn (`R`).
    pub fn cw(face: Face) -> Self {
        Self::new(face, Amount::Quarter, Direction::Clockwise)
    }

    /// Counter-clockwise quarter turn (`R'`).
    pub fn ccw(face: Face) -> Self {
        Self::new(face, Amount::Quarter, Direction::CounterClockwise)
    }

    /// Half turn (`R2`).
    pub fn half(face: Face) -> Self {
        Self::new(face, Amount::Half, Direction::Clockwise)
    }

    /// Quarter turn in the given direction.
    pub fn quarter(face: Face, direction: Direction) -> Self {
        Self::new(face, Amount::Quarter, direction)
    }

    /// The turned face.
    pub fn face(&self) -> Face {
        self.face
    }

    /// The turn direction. Always clockwise for half turns.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether this is a half turn.
    pub fn is_half(&self) -> bool {
        self.amount == Amount::Half
    }

    /// Net clockwise quarter turns in `1..=3`.
    pub fn clockwise_quarters(&self) -> u8 {
        match (self.amount, self.direction) {
            (Amount::Half, _) => 2,
            (Amount::Quarter, Direction::Clockwise) => 1,
            (Amount::Quarter, Direction::CounterClockwise) => 3,
        }
    }

    /// The move that undoes this one. Half turns are their own inverse.
    pub fn inverse(&self) -> Self {
        match self.amount {
            Amount::Half => *self,
            Amount::Quarter => Self::quarter(self.face, self.direction.reversed()),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match (self.amount, self.direction) {
            (Amount::Half, _) => "2",
            (Amount::Quarter, Direction::Clockwise) => "",
            (Amount::Quarter, Direction::CounterClockwise) => "'",
        };
        write!(f, "{}{}", self.face, suffix)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl FromStr for Move {
    type Err = CubeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        notation::parse_move(s)
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.to_string()
    }
}

impl TryFrom<String> for Move {
    type Error = CubeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        notation::parse_move(&value)
    }
}
