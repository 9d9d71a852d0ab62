//! CLI command implementations.

pub mod analyze;
pub mod apply;
pub mod init_config;
pub mod track;

use std::io::Write;

use cubetrack_core::CfopPhase;

/// Print a CFOP classification as indented text lines.
pub(crate) fn write_phase(out: &mut impl Write, result: &CfopPhase) -> std::io::Result<()> {
    writeln!(out, "Phase: {}", result.phase)?;
    match result.cross_color {
        Some(color) => writeln!(out, "  Cross:  {}", color)?,
        None => writeln!(out, "  Cross:  none")?,
    }
    let slots: Vec<&str> = result
        .f2l_slots_solved
        .iter()
        .map(|&s| if s { "x" } else { "." })
        .collect();
    writeln!(
        out,
        "  F2L:    [{}] {}/4",
        slots.join(""),
        result.f2l_solved_count()
    )?;
    writeln!(out, "  OLL:    {}", yes_no(result.oll_solved))?;
    writeln!(out, "  PLL:    {}", yes_no(result.pll_solved))?;
    Ok(())
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "done"
    } else {
        "pending"
    }
}
