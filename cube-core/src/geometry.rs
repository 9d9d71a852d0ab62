//! Facelet coordinates and the face-turn permutations derived from them.
//!
//! Every facelet is identified by the position of its cubie and the outward
//! normal of the sticker, with `x` pointing to R, `y` to U and `z` to F. A
//! clockwise quarter turn of a face is a -90 degree rotation about that
//! face's outward normal, applied to every facelet in the face's layer.
//! The permutation tables are computed once from that rule, so the adjacency
//! cycles (R carries F to U, U carries F to L, and so on) fall out of the
//! geometry instead of being written by hand.

use std::sync::OnceLock;

use cubetrack_types::Face;

/// Number of facelets on a 3x3x3 cube.
pub const FACELETS: usize = 54;

pub(crate) type Vec3 = [i8; 3];

/// A facelet in cube space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Sticker {
    /// Cubie position, each component in `-1..=1`.
    pub pos: Vec3,
    /// Outward normal of the sticker.
    pub normal: Vec3,
}

/// `table[dest] = src`: the facelet whose color lands on `dest`.
pub(crate) type Permutation = [usize; FACELETS];

struct Tables {
    stickers: [Sticker; FACELETS],
    clockwise: [Permutation; 6],
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(build_tables)
}

/// Flat facelet index of `face[i]`.
pub(crate) fn index(face: Face, i: usize) -> usize {
    face.index() * 9 + i
}

/// The face a flat facelet index belongs to.
pub(crate) fn face_of(index: usize) -> Face {
    Face::ALL[index / 9]
}

/// Outward normal of a face.
pub(crate) fn normal(face: Face) -> Vec3 {
    match face {
        Face::U => [0, 1, 0],
        Face::D => [0, -1, 0],
        Face::F => [0, 0, 1],
        Face::B => [0, 0, -1],
        Face::L => [-1, 0, 0],
        Face::R => [1, 0, 0],
    }
}

pub(crate) fn dot(a: Vec3, b: Vec3) -> i8 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Rotate `v` by -90 degrees about the unit axis `axis`:
/// `v' = (axis . v) axis - axis x v`.
fn rotate_clockwise(axis: Vec3, v: Vec3) -> Vec3 {
    let d = dot(axis, v);
    let c = cross(axis, v);
    [
        d * axis[0] - c[0],
        d * axis[1] - c[1],
        d * axis[2] - c[2],
    ]
}

/// Position of facelet `i` of `face`.
///
/// Row-major as viewed facing the face: side faces with U on top, U with B
/// on top, D with F on top. Column 0 of each face therefore touches its
/// left-hand neighbour in the usual unfolded net.
fn sticker(face: Face, i: usize) -> Sticker {
    let row = (i / 3) as i8;
    let col = (i % 3) as i8;
    let pos = match face {
        Face::U => [col - 1, 1, row - 1],
        Face::D => [col - 1, -1, 1 - row],
        Face::F => [col - 1, 1 - row, 1],
        Face::B => [1 - col, 1 - row, -1],
        Face::L => [-1, 1 - row, col - 1],
        Face::R => [1, 1 - row, 1 - col],
    };
    Sticker {
        pos,
        normal: normal(face),
    }
}

fn build_tables() -> Tables {
    let mut stickers = [Sticker {
        pos: [0; 3],
        normal: [0; 3],
    }; FACELETS];
    for face in Face::ALL {
        for i in 0..9 {
            stickers[index(face, i)] = sticker(face, i);
        }
    }

    let mut clockwise = [[0usize; FACELETS]; 6];
    for face in Face::ALL {
        let axis = normal(face);
        let table = &mut clockwise[face.index()];
        for (dest, slot) in table.iter_mut().enumerate() {
            *slot = dest;
        }
        for (src, s) in stickers.iter().enumerate() {
            if dot(s.pos, axis) != 1 {
                continue;
            }
            let moved = Sticker {
                pos: rotate_clockwise(axis, s.pos),
                normal: rotate_clockwise(axis, s.normal),
            };
            // Rotations map facelets onto facelets, so the lookup always hits.
            if let Some(dest) = stickers.iter().position(|t| *t == moved) {
                table[dest] = src;
            }
        }
    }

    Tables {
        stickers,
        clockwise,
    }
}

/// Clockwise quarter-turn permutation of `face`.
pub(crate) fn clockwise(face: Face) -> &'static Permutation {
    &tables().clockwise[face.index()]
}

/// The sticker at a flat facelet index.
pub(crate) fn sticker_at(index: usize) -> Sticker {
    tables().stickers[index]
}

/// Flat indices of every facelet on the cubie at `pos`.
pub(crate) fn cubie(pos: Vec3) -> impl Iterator<Item = usize> {
    tables()
        .stickers
        .iter()
        .enumerate()
        .filter(move |(_, s)| s.pos == pos)
        .map(|(i, _)| i)
}
