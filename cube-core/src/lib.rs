//! # cubetrack-core
//!
//! Pure logic for cubetrack (no I/O, instant tests).
//!
//! This crate simulates a 3x3x3 cube, follows a scramble through a live
//! move stream and classifies cube states into CFOP stages, without any
//! device, network or disk I/O.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about state transitions
//!
//! The actual I/O (reading moves from a device or terminal, printing) is
//! performed by `cubetrack-cli`, which feeds moves into the tracker and
//! renders the events it returns.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cfop;
pub mod cube;
mod geometry;
pub mod tracker;

pub use cfop::{detect_current_phase, CfopPhase, Phase};
pub use cube::CubeState;
pub use geometry::FACELETS;
pub use tracker::{
    MoveState, MoveStatus, ScrambleSession, ScrambleTracker, SessionStatus, TrackerConfig,
    TrackerEvent, TrackerSnapshot, DEFAULT_RESET_THRESHOLD,
};
