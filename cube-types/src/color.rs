//! Sticker colors and face layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six sticker colors of a standard 3x3x3 cube.
///
/// Declaration order is also the priority order used to break ties between
/// cross candidates: White > Yellow > Red > Orange > Blue > Green.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// White, home color of U.
    White,
    /// Yellow, home color of D.
    Yellow,
    /// Red, home color of R.
    Red,
    /// Orange, home color of L.
    Orange,
    /// Blue, home color of B.
    Blue,
    /// Green, home color of F.
    Green,
}

impl Color {
    /// All colors in priority order.
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Yellow,
        Color::Red,
        Color::Orange,
        Color::Blue,
        Color::Green,
    ];

    /// Dense index in `0..6`, following [`Color::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter abbreviation (`W Y R O B G`).
    pub fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Blue => 'B',
            Color::Green => 'G',
        }
    }

    /// Parse a single-letter abbreviation (case-insensitive).
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'Y' => Some(Color::Yellow),
            'R' => Some(Color::Red),
            'O' => Some(Color::Orange),
            'B' => Some(Color::Blue),
            'G' => Some(Color::Green),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "white",
            Color::Yellow => "yellow",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Green => "green",
        };
        write!(f, "{}", name)
    }
}

/// One of the six face layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Up.
    U,
    /// Down.
    D,
    /// Front.
    F,
    /// Back.
    B,
    /// Left.
    L,
    /// Right.
    R,
}

impl Face {
    /// All faces, in storage order.
    pub const ALL: [Face; 6] = [Face::U, Face::D, Face::F, Face::B, Face::L, Face::R];

    /// Dense index in `0..6`, following [`Face::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Notation letter of this face.
    pub fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::D => 'D',
            Face::F => 'F',
            Face::B => 'B',
            Face::L => 'L',
            Face::R => 'R',
        }
    }

    /// Parse a notation letter. Lowercase letters denote wide turns in
    /// standard notation and are rejected.
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Face::U),
            'D' => Some(Face::D),
            'F' => Some(Face::F),
            'B' => Some(Face::B),
            'L' => Some(Face::L),
            'R' => Some(Face::R),
            _ => None,
        }
    }

    /// The face on the other side of the cube.
    pub fn opposite(self) -> Self {
        match self {
            Face::U => Face::D,
            Face::D => Face::U,
            Face::F => Face::B,
            Face::B => Face::F,
            Face::L => Face::R,
            Face::R => Face::L,
        }
    }

    /// Color of this face on a solved cube (white top, green front).
    pub fn home_color(self) -> Color {
        match self {
            Face::U => Color::White,
            Face::D => Color::Yellow,
            Face::F => Color::Green,
            Face::B => Color::Blue,
            Face::L => Color::Orange,
            Face::R => Color::Red,
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_letters_roundtrip() {
        for color in Color::ALL {
            assert_eq!(Color::from_letter(color.letter()), Some(color));
        }
        assert_eq!(Color::from_letter('w'), Some(Color::White));
        assert_eq!(Color::from_letter('X'), None);
    }

    #[test]
    fn color_priority_follows_declaration_order() {
        assert!(Color::White < Color::Yellow);
        assert!(Color::Blue < Color::Green);
        assert_eq!(Color::ALL.iter().min(), Some(&Color::White));
    }

    #[test]
    fn face_letters_roundtrip() {
        for face in Face::ALL {
            assert_eq!(Face::from_letter(face.letter()), Some(face));
        }
        assert_eq!(Face::from_letter('r'), None);
        assert_eq!(Face::from_letter('M'), None);
    }

    #[test]
    fn opposite_is_involution() {
        for face in Face::ALL {
            assert_ne!(face.opposite(), face);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn home_colors_are_distinct() {
        let mut seen = [false; 6];
        for face in Face::ALL {
            let idx = face.home_color().index();
            assert!(!seen[idx], "duplicate home color for {}", face);
            seen[idx] = true;
        }
    }

    #[test]
    fn color_serializes_lowercase() {
        let json = serde_json::to_string(&Color::Orange).unwrap();
        assert_eq!(json, "\"orange\"");
    }
}
