//! Cube state model.
//!
//! [`CubeState`] is an immutable value: [`CubeState::apply_move`] returns a
//! new state and never touches the receiver, so two holders of a state can
//! never observe each other's turns.

use serde::{Deserialize, Serialize};
use std::fmt;

use cubetrack_types::{Color, CubeError, Face, Move};

use crate::geometry::{self, FACELETS};

/// The colors of all 54 facelets.
///
/// Faces are stored in [`Face::ALL`] order, each as 9 colors row-major as
/// viewed facing that face (side faces with U on top, U with B on top, D
/// with F on top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeState {
    faces: [[Color; 9]; 6],
}

impl CubeState {
    /// The solved cube: every face uniformly its home color.
    pub fn solved() -> Self {
        let mut faces = [[Color::White; 9]; 6];
        for face in Face::ALL {
            faces[face.index()] = [face.home_color(); 9];
        }
        Self { faces }
    }

    /// Build a state from explicit face colors.
    ///
    /// Rejects layouts that break the color-count invariant or whose centers
    /// are not six distinct colors.
    pub fn from_faces(faces: [[Color; 9]; 6]) -> Result<Self, CubeError> {
        let state = Self { faces };
        let counts = state.color_counts();
        if let Some(color) = Color::ALL.iter().find(|c| counts[c.index()] != 9) {
            return Err(CubeError::InvalidFacelets(format!(
                "expected 9 {} facelets, found {}",
                color,
                counts[color.index()]
            )));
        }
        let mut centers = [false; 6];
        for face in Face::ALL {
            let c = state.center(face).index();
            if centers[c] {
                return Err(CubeError::InvalidFacelets(format!(
                    "duplicate center color {}",
                    state.center(face)
                )));
            }
            centers[c] = true;
        }
        Ok(state)
    }

    /// Parse 54 color letters (`W Y R O B G`), faces in `U D F B L R` order.
    ///
    /// Whitespace is ignored, so the output of [`CubeState::to_facelet_string`]
    /// can be pasted back with or without separators.
    pub fn from_facelet_string(text: &str) -> Result<Self, CubeError> {
        let letters: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.len() != FACELETS {
            return Err(CubeError::InvalidFacelets(format!(
                "expected {} facelets, found {}",
                FACELETS,
                letters.len()
            )));
        }
        let mut faces = [[Color::White; 9]; 6];
        for (i, &letter) in letters.iter().enumerate() {
            let color = Color::from_letter(letter).ok_or_else(|| {
                CubeError::InvalidFacelets(format!("unknown color letter {:?}", letter))
            })?;
            faces[i / 9][i % 9] = color;
        }
        Self::from_faces(faces)
    }

    /// 54 color letters, one space between faces.
    pub fn to_facelet_string(&self) -> String {
        self.faces
            .iter()
            .map(|face| face.iter().map(|c| c.letter()).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The 9 colors of `face`.
    pub fn face(&self, face: Face) -> &[Color; 9] {
        &self.faces[face.index()]
    }

    /// Center color of `face`. Face turns never move centers.
    pub fn center(&self, face: Face) -> Color {
        self.faces[face.index()][4]
    }

    /// Color of a flat facelet index (`face * 9 + i`).
    pub(crate) fn facelet(&self, index: usize) -> Color {
        self.faces[index / 9][index % 9]
    }

    /// Number of facelets of each color, indexed by [`Color::index`].
    pub fn color_counts(&self) -> [usize; 6] {
        let mut counts = [0usize; 6];
        for face in &self.faces {
            for color in face {
                counts[color.index()] += 1;
            }
        }
        counts
    }

    /// Whether every face is uniformly its center color.
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|face| face.iter().all(|&c| c == face[4]))
    }

    /// Return the state after turning `mv`.
    ///
    /// A clockwise quarter turn applies the face's permutation once, a half
    /// turn applies it twice, a counter-clockwise quarter turn (three
    /// clockwise quarters) applies its inverse.
    pub fn apply_move(&self, mv: Move) -> Self {
        let table = geometry::clockwise(mv.face());
        match mv.clockwise_quarters() {
            1 => self.permuted(table),
            2 => self.permuted(table).permuted(table),
            _ => self.inverse_permuted(table),
        }
    }

    /// Left fold of [`CubeState::apply_move`] over `moves`.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |state, &mv| state.apply_move(mv))
    }

    fn permuted(&self, table: &geometry::Permutation) -> Self {
        let mut faces = self.faces;
        for (dest, &src) in table.iter().enumerate() {
            faces[dest / 9][dest % 9] = self.facelet(src);
        }
        Self { faces }
    }

    fn inverse_permuted(&self, table: &geometry::Permutation) -> Self {
        let mut faces = self.faces;
        for (dest, &src) in table.iter().enumerate() {
            faces[src / 9][src % 9] = self.facelet(dest);
        }
        Self { faces }
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

/// Unfolded net: U above, `L F R B` across, D below.
impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |face: Face, r: usize| -> String {
            self.face(face)[r * 3..r * 3 + 3]
                .iter()
                .map(|c| c.letter().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        for r in 0..3 {
            writeln!(f, "      {}", row(Face::U, r))?;
        }
        for r in 0..3 {
            writeln!(
                f,
                "{} {} {} {}",
                row(Face::L, r),
                row(Face::F, r),
                row(Face::R, r),
                row(Face::B, r)
            )?;
        }
        for r in 0..3 {
            writeln!(f, "      {}", row(Face::D, r))?;
        }
        Ok(())
    }
}
