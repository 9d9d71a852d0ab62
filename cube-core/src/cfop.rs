//! CFOP phase classification.
//!
//! [`detect_current_phase`] looks at a single [`CubeState`] and reports which
//! CFOP stage is plausibly in progress. It keeps no history: the same state
//! always classifies the same way.

use serde::{Deserialize, Serialize};
use std::fmt;

use cubetrack_types::{Color, Face};

use crate::cube::CubeState;
use crate::geometry::{self, dot, Vec3};

/// Edge facelet indices of a face, in row-major order.
const EDGE_INDICES: [usize; 4] = [1, 3, 5, 7];

/// Corner facelet indices of a face; F2L slots are reported in this order.
const CORNER_INDICES: [usize; 4] = [0, 2, 6, 8];

/// The stage a solve is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No cross edge is in place.
    #[serde(rename = "scrambled")]
    Scrambled,
    /// Cross done, no F2L pair yet.
    #[serde(rename = "cross")]
    Cross,
    /// Working on the first F2L pair.
    #[serde(rename = "f2l-1")]
    F2l1,
    /// Working on the second F2L pair.
    #[serde(rename = "f2l-2")]
    F2l2,
    /// Working on the third F2L pair.
    #[serde(rename = "f2l-3")]
    F2l3,
    /// Working on the last F2L pair.
    #[serde(rename = "f2l-4")]
    F2l4,
    /// First two layers done, last layer not oriented.
    #[serde(rename = "oll")]
    Oll,
    /// Last layer oriented, not permuted.
    #[serde(rename = "pll")]
    Pll,
    /// Solved.
    #[serde(rename = "solved")]
    Solved,
}

impl Phase {
    /// The F2L phase for the slot being worked on (1-indexed). With no slot
    /// solved the phase is Cross, so this starts at the second slot.
    fn f2l(slot: usize) -> Self {
        match slot {
            2 => Phase::F2l2,
            3 => Phase::F2l3,
            _ => Phase::F2l4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Scrambled => "Scrambled",
            Phase::Cross => "Cross",
            Phase::F2l1 => "F2L-1",
            Phase::F2l2 => "F2L-2",
            Phase::F2l3 => "F2L-3",
            Phase::F2l4 => "F2L-4",
            Phase::Oll => "OLL",
            Phase::Pll => "PLL",
            Phase::Solved => "Solved",
        };
        write!(f, "{}", name)
    }
}

/// Classification of a cube state.
///
/// The progress flags are filled in regardless of `phase`, so a UI can draw
/// slot indicators independently of the single phase label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfopPhase {
    /// The stage currently in progress.
    pub phase: Phase,
    /// Color of the cross face, if any cross edge is in place.
    pub cross_color: Option<Color>,
    /// Per-slot F2L completion, in the order of the cross face's corners
    /// (facelets 0, 2, 6, 8).
    pub f2l_slots_solved: [bool; 4],
    /// Last layer face uniformly its own color, and each side row of the
    /// last layer a single color.
    pub oll_solved: bool,
    /// Last layer side rows match their faces.
    pub pll_solved: bool,
}

impl CfopPhase {
    /// Number of solved F2L slots.
    pub fn f2l_solved_count(&self) -> usize {
        self.f2l_slots_solved.iter().filter(|&&s| s).count()
    }
}

/// Classify `state` into a CFOP stage.
pub fn detect_current_phase(state: &CubeState) -> CfopPhase {
    if state.is_solved() {
        return CfopPhase {
            phase: Phase::Solved,
            cross_color: Some(Color::ALL[0]),
            f2l_slots_solved: [true; 4],
            oll_solved: true,
            pll_solved: true,
        };
    }

    let Some((cross_face, matched)) = pick_cross(state) else {
        return CfopPhase {
            phase: Phase::Scrambled,
            cross_color: None,
            f2l_slots_solved: [false; 4],
            oll_solved: false,
            pll_solved: false,
        };
    };
    let cross_complete = matched == EDGE_INDICES.len();

    let f2l_slots_solved = CORNER_INDICES.map(|i| slot_solved(state, cross_face, i));
    let solved_slots = f2l_slots_solved.iter().filter(|&&s| s).count();

    let last_layer = cross_face.opposite();
    let oll_solved = state
        .face(last_layer)
        .iter()
        .all(|&c| c == state.center(last_layer))
        && last_layer_rows_uniform(state, last_layer);
    let pll_solved = oll_solved && last_layer_rows_aligned(state, last_layer);

    let phase = if solved_slots < 4 {
        if solved_slots > 0 {
            Phase::f2l(solved_slots + 1)
        } else if cross_complete {
            Phase::Cross
        } else {
            Phase::Scrambled
        }
    } else if !oll_solved {
        Phase::Oll
    } else if !pll_solved {
        Phase::Pll
    } else {
        // Everything but the cross edges is home: they sit flipped in place.
        Phase::Cross
    };

    CfopPhase {
        phase,
        cross_color: Some(state.center(cross_face)),
        f2l_slots_solved,
        oll_solved,
        pll_solved,
    }
}

/// The cross face with the most matching edges, ties broken by color
/// priority. `None` when no face has a single matching edge.
fn pick_cross(state: &CubeState) -> Option<(Face, usize)> {
    let mut best: Option<(Face, usize, Color)> = None;
    for face in Face::ALL {
        let matched = EDGE_INDICES
            .iter()
            .filter(|&&i| cubie_solved(state, position(face, i)))
            .count();
        if matched == 0 {
            continue;
        }
        let color = state.center(face);
        let better = match best {
            None => true,
            Some((_, m, c)) => matched > m || (matched == m && color < c),
        };
        if better {
            best = Some((face, matched, color));
        }
    }
    best.map(|(face, matched, _)| (face, matched))
}

/// Corner at `corner_index` of the cross face plus the middle-layer edge
/// directly beside it.
fn slot_solved(state: &CubeState, cross_face: Face, corner_index: usize) -> bool {
    let corner = position(cross_face, corner_index);
    let n = geometry::normal(cross_face);
    let d = dot(corner, n);
    let edge = [corner[0] - d * n[0], corner[1] - d * n[1], corner[2] - d * n[2]];
    cubie_solved(state, corner) && cubie_solved(state, edge)
}

/// Flat indices of `side`'s row that lies in the last layer.
fn last_layer_row(side: Face, last_layer: Face) -> impl Iterator<Item = usize> {
    let n = geometry::normal(last_layer);
    (0..9)
        .map(move |i| geometry::index(side, i))
        .filter(move |&i| dot(geometry::sticker_at(i).pos, n) == 1)
}

/// The four faces around the last layer.
fn side_faces(last_layer: Face) -> impl Iterator<Item = Face> {
    Face::ALL
        .into_iter()
        .filter(move |&f| f != last_layer && f != last_layer.opposite())
}

/// Each side face's last-layer row is a single color, not necessarily its
/// own center.
fn last_layer_rows_uniform(state: &CubeState, last_layer: Face) -> bool {
    side_faces(last_layer).all(|side| {
        let mut row = last_layer_row(side, last_layer).map(|i| state.facelet(i));
        match row.next() {
            Some(first) => row.all(|c| c == first),
            None => true,
        }
    })
}

/// Every side facelet touching the last layer matches its own center.
fn last_layer_rows_aligned(state: &CubeState, last_layer: Face) -> bool {
    side_faces(last_layer).all(|side| {
        last_layer_row(side, last_layer).all(|i| state.facelet(i) == state.center(side))
    })
}

fn position(face: Face, i: usize) -> Vec3 {
    geometry::sticker_at(geometry::index(face, i)).pos
}

/// Whether every facelet of the cubie at `pos` shows its face's center color.
fn cubie_solved(state: &CubeState, pos: Vec3) -> bool {
    geometry::cubie(pos).all(|i| state.facelet(i) == state.center(geometry::face_of(i)))
}
