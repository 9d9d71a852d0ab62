//! # cubetrack-types
//!
//! Vocabulary types shared by every cubetrack crate:
//! - [`Color`], [`Face`] - the six sticker colors and the six face layers
//! - [`Move`] - a single face turn, parsed from and displayed as notation
//! - [`notation`] - token and sequence parsing
//! - [`CubeError`] - error types

#![warn(missing_docs)]
#![warn(clippy::all)]

mod color;
mod error;
mod moves;
pub mod notation;

pub use color::{Color, Face};
pub use error::CubeError;
pub use moves::{Amount, Direction, Move};
pub use notation::{format_sequence, invert_sequence, parse_move, parse_sequence};
