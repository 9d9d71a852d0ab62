//! Apply a move sequence to a solved cube.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;

use cubetrack_core::{detect_current_phase, CubeState};
use cubetrack_types::{format_sequence, parse_sequence};

use super::write_phase;

/// Run the apply command.
pub fn run(moves: &str, json: bool, out: &mut impl Write) -> Result<()> {
    let moves = parse_sequence(moves).context("Invalid move sequence")?;
    let state = CubeState::solved().apply_moves(&moves);
    let result = detect_current_phase(&state);

    if json {
        let value = json!({
            "moves": format_sequence(&moves),
            "facelets": state.to_facelet_string(),
            "solved": state.is_solved(),
            "cfop": result,
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        return Ok(());
    }

    writeln!(out, "Moves: {} ({} moves)", format_sequence(&moves), moves.len())?;
    writeln!(out)?;
    write!(out, "{}", state)?;
    writeln!(out)?;
    writeln!(out, "Facelets: {}", state.to_facelet_string())?;
    write_phase(out, &result)?;
    Ok(())
}
