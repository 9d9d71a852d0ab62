//! Error types for cubetrack.

use thiserror::Error;

/// Errors that can occur while parsing notation or building cube states.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    /// A move token is not a face letter with at most one `'` or `2` modifier.
    ///
    /// `position` is the 0-based index of the token within its sequence
    /// (always 0 for a standalone token).
    #[error("invalid move token {token:?} at position {position}")]
    InvalidMoveToken {
        /// The rejected token, verbatim.
        token: String,
        /// Index of the token in the sequence.
        position: usize,
    },

    /// A facelet description does not describe a reachable color layout.
    #[error("invalid facelets: {0}")]
    InvalidFacelets(String),
}
