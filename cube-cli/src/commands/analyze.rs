//! Classify a cube state into a CFOP stage.

use anyhow::{Context, Result};
use std::io::Write;

use cubetrack_core::{detect_current_phase, CubeState};
use cubetrack_types::parse_sequence;

use super::write_phase;

/// The state reached by applying `text` to a solved cube.
pub fn state_from_moves(text: &str) -> Result<CubeState> {
    let moves = parse_sequence(text).context("Invalid move sequence")?;
    Ok(CubeState::solved().apply_moves(&moves))
}

/// The state described by 54 color letters.
pub fn state_from_facelets(text: &str) -> Result<CubeState> {
    CubeState::from_facelet_string(text).context("Invalid facelet string")
}

/// Run the analyze command.
pub fn run(state: &CubeState, json: bool, out: &mut impl Write) -> Result<()> {
    let result = detect_current_phase(state);
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
    } else {
        write_phase(out, &result)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(state: &CubeState, json: bool) -> String {
        let mut out = Vec::new();
        run(state, json, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn analyze_moves() {
        let state = state_from_moves("R U R' U R U2 R'").unwrap();
        let text = output(&state, false);
        assert!(text.starts_with("Phase: OLL"));
        assert!(text.contains("Cross:  yellow"));
        assert!(text.contains("[xxxx] 4/4"));
    }

    #[test]
    fn analyze_facelets_matches_moves() {
        let by_moves = state_from_moves("F2").unwrap();
        let by_facelets = state_from_facelets(&by_moves.to_facelet_string()).unwrap();
        assert_eq!(output(&by_moves, true), output(&by_facelets, true));
    }

    #[test]
    fn analyze_json_fields() {
        let state = state_from_moves("U").unwrap();
        let value: serde_json::Value = serde_json::from_str(&output(&state, true)).unwrap();
        assert_eq!(value["phase"], "pll");
        assert_eq!(value["oll_solved"], true);
        assert_eq!(value["pll_solved"], false);
        assert_eq!(value["f2l_slots_solved"], serde_json::json!([true, true, true, true]));
    }

    #[test]
    fn analyze_rejects_bad_facelets() {
        assert!(state_from_facelets("WWW").is_err());
        assert!(state_from_moves("R R3").is_err());
    }
}
