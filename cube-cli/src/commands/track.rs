//! Follow a scramble through moves read line by line.
//!
//! Each line holds whitespace separated move tokens as a smart cube (or a
//! person) reports them. Two control lines are understood:
//!
//! - `:reset` - the cube has been put back to solved; restart the scramble
//! - `:scramble <text>` - replace the scramble

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use cubetrack_core::{ScrambleTracker, TrackerConfig, TrackerEvent};
use cubetrack_types::format_sequence;

/// Run the track command until `input` is exhausted.
///
/// Returns the tracker so callers can inspect the final session.
pub async fn run<R, W>(
    config: TrackerConfig,
    scramble: &str,
    input: R,
    json: bool,
    out: &mut W,
) -> Result<ScrambleTracker>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut tracker = ScrambleTracker::with_config(config);
    tracker
        .set_scramble(scramble)
        .context("Invalid scramble")?;
    write_start(&tracker, json, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read moves")?
    {
        let line = line.trim();
        if let Some(command) = line.strip_prefix(':') {
            control(&mut tracker, command, json, out)?;
            continue;
        }
        for token in line.split_whitespace() {
            match tracker.ingest_token(token) {
                Ok(events) => write_events(&tracker, token, &events, json, out)?,
                Err(e) => tracing::warn!("{}, skipped", e),
            }
        }
    }

    Ok(tracker)
}

fn control<W: Write>(
    tracker: &mut ScrambleTracker,
    command: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let (name, rest) = command
        .split_once(char::is_whitespace)
        .unwrap_or((command, ""));
    match name {
        "reset" => {
            tracker.reset_cube();
            write_start(tracker, json, out)
        }
        "scramble" => match tracker.set_scramble(rest) {
            Ok(()) => write_start(tracker, json, out),
            Err(e) => {
                tracing::warn!("{}, scramble unchanged", e);
                Ok(())
            }
        },
        other => {
            tracing::warn!("Unknown command :{}", other);
            Ok(())
        }
    }
}

fn write_start<W: Write>(tracker: &ScrambleTracker, json: bool, out: &mut W) -> Result<()> {
    if json {
        let value = json!({ "snapshot": tracker.snapshot() });
        writeln!(out, "{}", serde_json::to_string(&value)?)?;
        return Ok(());
    }

    let scramble = tracker.session().original_scramble();
    if scramble.is_empty() {
        writeln!(out, "No scramble, waiting")?;
    } else {
        writeln!(
            out,
            "Scramble: {} ({} moves)",
            format_sequence(scramble),
            scramble.len()
        )?;
        if tracker.config().split_half_turns {
            writeln!(out, "Half turns may be done as two quarter turns")?;
        }
        write_next(tracker, out)?;
    }
    Ok(())
}

fn write_events<W: Write>(
    tracker: &ScrambleTracker,
    token: &str,
    events: &[TrackerEvent],
    json: bool,
    out: &mut W,
) -> Result<()> {
    if json {
        let value = json!({
            "move": token,
            "events": events,
            "snapshot": tracker.snapshot(),
        });
        writeln!(out, "{}", serde_json::to_string(&value)?)?;
        return Ok(());
    }

    if events.is_empty() {
        return Ok(());
    }
    for event in events {
        writeln!(out, "{:<3} {}", token, describe(event))?;
    }
    write_next(tracker, out)?;
    Ok(())
}

fn write_next<W: Write>(tracker: &ScrambleTracker, out: &mut W) -> Result<()> {
    if let Some(mv) = tracker.expected_move() {
        let (done, total) = tracker.progress();
        writeln!(out, "    next: {}  [{}/{}]", mv, done, total)?;
    }
    Ok(())
}

fn describe(event: &TrackerEvent) -> String {
    match event {
        TrackerEvent::Advanced { index, mv } => format!("move {} ({}) done", index + 1, mv),
        TrackerEvent::HalfTurnSplit { remaining, .. } => {
            format!("half turn started, {} to finish", remaining)
        }
        TrackerEvent::Diverged { mv, depth } => {
            format!("off track with {} (undo {} moves)", mv, depth)
        }
        TrackerEvent::RecoveryProgress { remaining } => {
            format!("undoing, {} to go", remaining)
        }
        TrackerEvent::Recovered { cursor } => format!("back on track at move {}", cursor + 1),
        TrackerEvent::Completed => "scramble complete".to_string(),
        TrackerEvent::ResetRequired { depth } => format!(
            "{} moves off track, solve the cube and send :reset",
            depth
        ),
        TrackerEvent::Solved => "cube solved".to_string(),
    }
}
