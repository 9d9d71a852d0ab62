//! Scramble tracking state machine.
//!
//! A [`ScrambleTracker`] owns one [`ScrambleSession`] and reconciles a live
//! stream of physical moves against the session's expected scramble. It
//! never blocks and never performs I/O: each [`ScrambleTracker::ingest`]
//! mutates the session and returns the [`TrackerEvent`]s the caller should
//! surface.
//!
//! ```text
//!  Idle --set_scramble--> Scrambling --last move--> Completed
//!                          |      ^
//!              unexpected  |      |  recovery stack emptied
//!                          v      |
//!                          Diverged --depth > threshold--> (should_reset_cube)
//! ```
//!
//! Divergence is tracked with two stacks: `diverged_moves` holds what was
//! physically turned (oldest first) and `recovery_moves` holds the undo
//! sequence (next move to perform at the front). A move that undoes the
//! newest divergence pops both; anything else pushes onto both.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use cubetrack_types::{parse_move, parse_sequence, CubeError, Move};

use crate::cube::CubeState;

/// Divergence depth beyond which the session gives up and asks for a reset.
pub const DEFAULT_RESET_THRESHOLD: usize = 10;

/// Tunables for a [`ScrambleTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// `should_reset_cube` is raised once more than this many moves are
    /// outstanding in the divergence stack.
    pub reset_threshold: usize,
    /// Accept two quarter turns for an expected half turn. Smart cubes only
    /// ever report quarter turns.
    pub split_half_turns: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            reset_threshold: DEFAULT_RESET_THRESHOLD,
            split_half_turns: false,
        }
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No scramble to follow.
    Idle,
    /// Following the scramble.
    Scrambling,
    /// The cube left the scramble path; recovery moves are pending.
    Diverged,
    /// Every scramble move was matched.
    Completed,
}

/// Display status of one scramble move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveStatus {
    /// Not reached yet.
    Pending,
    /// The next move to perform.
    Current,
    /// Done.
    Completed,
    /// The next move, blocked until the divergence is undone.
    Recovery,
}

/// One scramble move with its progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveState {
    /// The move still expected at this position.
    #[serde(rename = "move")]
    pub mv: Move,
    /// Progress of this move.
    pub status: MoveStatus,
    /// The expected move was rewritten (a half turn partly performed).
    pub was_modified: bool,
}

impl MoveState {
    fn pending(mv: Move) -> Self {
        Self {
            mv,
            status: MoveStatus::Pending,
            was_modified: false,
        }
    }
}

/// Everything known about the scramble in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrambleSession {
    original_scramble: Vec<Move>,
    move_states: Vec<MoveState>,
    cursor: usize,
    diverged_moves: Vec<Move>,
    recovery_moves: VecDeque<Move>,
    status: SessionStatus,
    should_reset_cube: bool,
    is_solved: bool,
    #[serde(skip)]
    cube: CubeState,
}

impl ScrambleSession {
    /// A fresh session on a solved cube. An empty scramble gives an Idle
    /// session.
    pub fn new(scramble: Vec<Move>) -> Self {
        let mut move_states: Vec<MoveState> =
            scramble.iter().copied().map(MoveState::pending).collect();
        let status = match move_states.first_mut() {
            Some(first) => {
                first.status = MoveStatus::Current;
                SessionStatus::Scrambling
            }
            None => SessionStatus::Idle,
        };
        Self {
            original_scramble: scramble,
            move_states,
            cursor: 0,
            diverged_moves: Vec::new(),
            recovery_moves: VecDeque::new(),
            status,
            should_reset_cube: false,
            is_solved: true,
            cube: CubeState::solved(),
        }
    }

    /// The scramble as supplied.
    pub fn original_scramble(&self) -> &[Move] {
        &self.original_scramble
    }

    /// Per-move progress.
    pub fn move_states(&self) -> &[MoveState] {
        &self.move_states
    }

    /// Index of the next scramble move.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Unexpected moves still on the cube, oldest first.
    pub fn diverged_moves(&self) -> &[Move] {
        &self.diverged_moves
    }

    /// Moves that undo the divergence, next move first.
    pub fn recovery_moves(&self) -> &VecDeque<Move> {
        &self.recovery_moves
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The divergence got too deep; the cube must be recalibrated.
    pub fn should_reset_cube(&self) -> bool {
        self.should_reset_cube
    }

    /// Whether the tracked cube is currently solved.
    pub fn is_solved(&self) -> bool {
        self.is_solved
    }

    /// The tracked cube.
    pub fn cube(&self) -> &CubeState {
        &self.cube
    }
}

impl Default for ScrambleSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// What an ingested move did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// The expected move was performed.
    Advanced {
        /// Index of the completed scramble move.
        index: usize,
        /// The move performed.
        #[serde(rename = "move")]
        mv: Move,
    },
    /// Half of an expected half turn was performed.
    HalfTurnSplit {
        /// Index of the scramble move.
        index: usize,
        /// The quarter turn still expected there.
        remaining: Move,
    },
    /// An unexpected move was performed.
    Diverged {
        /// The move performed.
        #[serde(rename = "move")]
        mv: Move,
        /// Number of outstanding diverged moves.
        depth: usize,
    },
    /// A recovery move was performed; more remain.
    RecoveryProgress {
        /// Recovery moves still to perform.
        remaining: usize,
    },
    /// The divergence is fully undone and the scramble resumes.
    Recovered {
        /// Index of the scramble move expected next.
        cursor: usize,
    },
    /// The last scramble move was performed.
    Completed,
    /// Divergence exceeded the threshold; manual recalibration required.
    ResetRequired {
        /// Number of outstanding diverged moves.
        depth: usize,
    },
    /// The tracked cube became solved.
    Solved,
}

/// Owned, serialisable view of a tracker for display or JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerSnapshot {
    /// Lifecycle state.
    pub status: SessionStatus,
    /// Completed scramble moves.
    pub completed: usize,
    /// Scramble length.
    pub total: usize,
    /// Next move to perform, if any.
    pub expected_move: Option<Move>,
    /// Per-move progress.
    pub move_states: Vec<MoveState>,
    /// Moves undoing the divergence, next first.
    pub recovery_moves: Vec<Move>,
    /// A manual reset is required.
    pub should_reset_cube: bool,
    /// The tracked cube is solved.
    pub is_solved: bool,
    /// Tracked cube as 54 color letters.
    pub facelets: String,
}

/// Follows a scramble through a live move stream.
#[derive(Debug, Clone, Default)]
pub struct ScrambleTracker {
    config: TrackerConfig,
    session: ScrambleSession,
}

impl ScrambleTracker {
    /// An Idle tracker with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An Idle tracker with the given configuration.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            config,
            session: ScrambleSession::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Replace the session with a new scramble on a solved cube.
    ///
    /// On a parse error the current session is kept as it was.
    pub fn set_scramble(&mut self, text: &str) -> Result<(), CubeError> {
        let moves = parse_sequence(text)?;
        self.set_scramble_moves(moves);
        Ok(())
    }

    /// Replace the session with an already parsed scramble.
    pub fn set_scramble_moves(&mut self, moves: Vec<Move>) {
        tracing::debug!("New scramble with {} moves", moves.len());
        self.session = ScrambleSession::new(moves);
    }

    /// Drop the session and return to Idle on a solved cube.
    pub fn clear(&mut self) {
        self.session = ScrambleSession::default();
    }

    /// Recalibrate: the physical cube is solved again, start the current
    /// scramble over. Discards all recovery state.
    pub fn reset_cube(&mut self) {
        tracing::info!(
            "Cube reset, restarting scramble ({} diverged moves discarded)",
            self.session.diverged_moves.len()
        );
        self.session = ScrambleSession::new(self.session.original_scramble.clone());
    }

    /// Parse a move token and ingest it. A bad token changes nothing.
    pub fn ingest_token(&mut self, token: &str) -> Result<Vec<TrackerEvent>, CubeError> {
        let mv = parse_move(token)?;
        Ok(self.ingest(mv))
    }

    /// Feed one physical move.
    ///
    /// Returns no events (and changes nothing) while the session is Idle or
    /// Completed. Once a reset is required the stacks are frozen, but the
    /// tracked cube keeps following the physical one.
    pub fn ingest(&mut self, mv: Move) -> Vec<TrackerEvent> {
        let mut events = Vec::new();
        let status = self.session.status;
        if matches!(status, SessionStatus::Idle | SessionStatus::Completed) {
            return events;
        }

        if self.session.should_reset_cube {
            tracing::debug!("Reset pending, {} not reconciled", mv);
        } else if status == SessionStatus::Scrambling {
            self.advance(mv, &mut events);
        } else {
            self.recover(mv, &mut events);
        }

        let session = &mut self.session;
        session.cube = session.cube.apply_move(mv);
        let was_solved = session.is_solved;
        session.is_solved = session.cube.is_solved();
        if session.is_solved && !was_solved {
            events.push(TrackerEvent::Solved);
        }
        events
    }

    fn advance(&mut self, mv: Move, events: &mut Vec<TrackerEvent>) {
        let split = self.config.split_half_turns;
        let session = &mut self.session;
        let index = session.cursor;
        let Some(expected) = session.move_states.get(index).map(|s| s.mv) else {
            return;
        };

        if mv == expected {
            session.move_states[index].status = MoveStatus::Completed;
            session.cursor += 1;
            events.push(TrackerEvent::Advanced { index, mv });
            tracing::debug!("Scramble move {} ({}) done", index, mv);

            match session.move_states.get_mut(session.cursor) {
                Some(next) => next.status = MoveStatus::Current,
                None => {
                    session.status = SessionStatus::Completed;
                    events.push(TrackerEvent::Completed);
                    tracing::info!("Scramble completed");
                }
            }
            return;
        }

        if split && is_half_of(mv, expected) {
            let remaining = Move::quarter(mv.face(), mv.direction());
            let state = &mut session.move_states[index];
            state.mv = remaining;
            state.was_modified = true;
            events.push(TrackerEvent::HalfTurnSplit { index, remaining });
            return;
        }

        self.diverge(mv, events);
    }

    fn recover(&mut self, mv: Move, events: &mut Vec<TrackerEvent>) {
        let split = self.config.split_half_turns;
        let session = &mut self.session;
        let Some(&next) = session.recovery_moves.front() else {
            // Diverged with nothing to undo cannot happen; resume the scramble.
            session.status = SessionStatus::Scrambling;
            self.advance(mv, events);
            return;
        };

        if mv == next {
            session.recovery_moves.pop_front();
            session.diverged_moves.pop();
            if session.recovery_moves.is_empty() {
                session.status = SessionStatus::Scrambling;
                if let Some(state) = session.move_states.get_mut(session.cursor) {
                    state.status = MoveStatus::Current;
                }
                events.push(TrackerEvent::Recovered {
                    cursor: session.cursor,
                });
                tracing::info!("Recovered, resuming at move {}", session.cursor);
            } else {
                events.push(TrackerEvent::RecoveryProgress {
                    remaining: session.recovery_moves.len(),
                });
            }
            return;
        }

        if split && is_half_of(mv, next) {
            // Half of a half-turn undo: the newest divergence is now a net
            // quarter turn, undone by repeating `mv`.
            let remaining = Move::quarter(mv.face(), mv.direction());
            session.recovery_moves[0] = remaining;
            if let Some(last) = session.diverged_moves.last_mut() {
                *last = remaining.inverse();
            }
            events.push(TrackerEvent::RecoveryProgress {
                remaining: session.recovery_moves.len(),
            });
            return;
        }

        self.diverge(mv, events);
    }

    fn diverge(&mut self, mv: Move, events: &mut Vec<TrackerEvent>) {
        let threshold = self.config.reset_threshold;
        let session = &mut self.session;
        session.diverged_moves.push(mv);
        session.recovery_moves.push_front(mv.inverse());
        session.status = SessionStatus::Diverged;
        if let Some(state) = session.move_states.get_mut(session.cursor) {
            state.status = MoveStatus::Recovery;
        }

        let depth = session.diverged_moves.len();
        events.push(TrackerEvent::Diverged { mv, depth });
        tracing::debug!("Diverged with {} (depth {})", mv, depth);

        if depth > threshold {
            session.should_reset_cube = true;
            events.push(TrackerEvent::ResetRequired { depth });
            tracing::warn!(
                "Divergence depth {} exceeds {}, cube reset required",
                depth,
                threshold
            );
        }
    }

    /// The session being tracked.
    pub fn session(&self) -> &ScrambleSession {
        &self.session
    }

    /// The tracked cube.
    pub fn cube(&self) -> &CubeState {
        self.session.cube()
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    /// Whether a manual reset is required.
    pub fn should_reset_cube(&self) -> bool {
        self.session.should_reset_cube
    }

    /// Idle with nothing to do and a solved cube (as opposed to a session
    /// that has just been cleared mid-way on a turned cube).
    pub fn is_idle_solved(&self) -> bool {
        self.session.status == SessionStatus::Idle && self.session.cube.is_solved()
    }

    /// The move the user should perform next, if any.
    pub fn expected_move(&self) -> Option<Move> {
        if self.session.should_reset_cube {
            return None;
        }
        match self.session.status {
            SessionStatus::Scrambling => self
                .session
                .move_states
                .get(self.session.cursor)
                .map(|s| s.mv),
            SessionStatus::Diverged => self.session.recovery_moves.front().copied(),
            SessionStatus::Idle | SessionStatus::Completed => None,
        }
    }

    /// Capture the current state for display.
    pub fn snapshot(&self) -> TrackerSnapshot {
        let (completed, total) = self.progress();
        TrackerSnapshot {
            status: self.session.status,
            completed,
            total,
            expected_move: self.expected_move(),
            move_states: self.session.move_states.clone(),
            recovery_moves: self.session.recovery_moves.iter().copied().collect(),
            should_reset_cube: self.session.should_reset_cube,
            is_solved: self.session.is_solved,
            facelets: self.cube().to_facelet_string(),
        }
    }

    /// Completed scramble moves and total scramble length.
    pub fn progress(&self) -> (usize, usize) {
        let done = self
            .session
            .move_states
            .iter()
            .filter(|s| s.status == MoveStatus::Completed)
            .count();
        (done, self.session.move_states.len())
    }
}

/// `mv` is a quarter turn on the face of the half turn `target`.
fn is_half_of(mv: Move, target: Move) -> bool {
    target.is_half() && !mv.is_half() && mv.face() == target.face()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubetrack_types::Face;

    fn tracker(scramble: &str) -> ScrambleTracker {
        let mut t = ScrambleTracker::new();
        t.set_scramble(scramble).unwrap();
        t
    }

    fn splitting(scramble: &str) -> ScrambleTracker {
        let mut t = ScrambleTracker::with_config(TrackerConfig {
            split_half_turns: true,
            ..TrackerConfig::default()
        });
        t.set_scramble(scramble).unwrap();
        t
    }

    fn feed(t: &mut ScrambleTracker, text: &str) -> Vec<TrackerEvent> {
        parse_sequence(text)
            .unwrap()
            .into_iter()
            .flat_map(|mv| t.ingest(mv))
            .collect()
    }

    fn mv(token: &str) -> Move {
        token.parse().unwrap()
    }

    #[test]
    fn starts_idle() {
        let t = ScrambleTracker::new();
        assert_eq!(t.status(), SessionStatus::Idle);
        assert!(t.is_idle_solved());
        assert_eq!(t.expected_move(), None);
    }

    #[test]
    fn set_scramble_starts_scrambling() {
        let t = tracker("R U2 F'");
        assert_eq!(t.status(), SessionStatus::Scrambling);
        assert_eq!(t.session().cursor(), 0);
        let statuses: Vec<MoveStatus> = t.session().move_states().iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![MoveStatus::Current, MoveStatus::Pending, MoveStatus::Pending]
        );
        assert_eq!(t.expected_move(), Some(mv("R")));
    }

    #[test]
    fn empty_scramble_stays_idle() {
        let t = tracker("   ");
        assert_eq!(t.status(), SessionStatus::Idle);
        assert!(t.is_idle_solved());
    }

    #[test]
    fn invalid_scramble_keeps_session() {
        let mut t = tracker("R U");
        t.ingest(mv("R"));
        let err = t.set_scramble("R X").unwrap_err();
        assert!(matches!(err, CubeError::InvalidMoveToken { position: 1, .. }));
        assert_eq!(t.session().cursor(), 1);
        assert_eq!(t.session().original_scramble(), &[mv("R"), mv("U")]);
    }

    #[test]
    fn exact_sequence_completes() {
        let mut t = tracker("R U R' U'");
        let events = feed(&mut t, "R U R' U'");
        assert_eq!(t.status(), SessionStatus::Completed);
        assert!(t.session().diverged_moves().is_empty());
        assert!(t.session().recovery_moves().is_empty());
        assert_eq!(t.progress(), (4, 4));
        assert_eq!(events.last(), Some(&TrackerEvent::Completed));
        assert!(t
            .session()
            .move_states()
            .iter()
            .all(|s| s.status == MoveStatus::Completed));
    }

    #[test]
    fn unexpected_move_diverges() {
        let mut t = tracker("R U");
        t.ingest(mv("R"));
        let events = t.ingest(mv("L"));
        assert_eq!(t.status(), SessionStatus::Diverged);
        assert_eq!(t.session().diverged_moves(), &[mv("L")]);
        assert_eq!(
            t.session().recovery_moves().iter().copied().collect::<Vec<_>>(),
            vec![mv("L'")]
        );
        assert_eq!(t.session().move_states()[1].status, MoveStatus::Recovery);
        assert_eq!(
            events,
            vec![TrackerEvent::Diverged {
                mv: mv("L"),
                depth: 1
            }]
        );
        assert_eq!(t.expected_move(), Some(mv("L'")));
    }

    #[test]
    fn undoing_divergence_resumes_at_same_cursor() {
        let mut t = tracker("R U");
        feed(&mut t, "R L");
        let events = t.ingest(mv("L'"));
        assert_eq!(t.status(), SessionStatus::Scrambling);
        assert!(t.session().recovery_moves().is_empty());
        assert!(t.session().diverged_moves().is_empty());
        assert_eq!(t.session().cursor(), 1);
        assert_eq!(t.expected_move(), Some(mv("U")));
        assert_eq!(t.session().move_states()[1].status, MoveStatus::Current);
        assert_eq!(events, vec![TrackerEvent::Recovered { cursor: 1 }]);

        feed(&mut t, "U");
        assert_eq!(t.status(), SessionStatus::Completed);
    }

    #[test]
    fn recovery_unwinds_newest_first() {
        let mut t = tracker("R U");
        feed(&mut t, "F D2 B'");
        assert_eq!(t.session().diverged_moves(), &[mv("F"), mv("D2"), mv("B'")]);
        assert_eq!(
            t.session().recovery_moves().iter().copied().collect::<Vec<_>>(),
            vec![mv("B"), mv("D2"), mv("F'")]
        );

        let events = t.ingest(mv("B"));
        assert_eq!(events, vec![TrackerEvent::RecoveryProgress { remaining: 2 }]);
        assert_eq!(t.session().diverged_moves(), &[mv("F"), mv("D2")]);

        feed(&mut t, "D2 F'");
        assert_eq!(t.status(), SessionStatus::Scrambling);
        assert_eq!(t.session().cursor(), 0);
        assert!(t.cube().is_solved());
    }

    #[test]
    fn divergence_deepens_while_diverged() {
        let mut t = tracker("R U");
        feed(&mut t, "L");
        // U is the next scramble move but the cube is off path.
        t.ingest(mv("R"));
        assert_eq!(t.session().diverged_moves(), &[mv("L"), mv("R")]);
        assert_eq!(t.expected_move(), Some(mv("R'")));
    }

    #[test]
    fn direction_matters() {
        let mut t = tracker("R U");
        t.ingest(mv("R'"));
        assert_eq!(t.status(), SessionStatus::Diverged);
        assert_eq!(t.session().cursor(), 0);
    }

    #[test]
    fn half_turn_matches_only_half_turn() {
        let mut t = tracker("R2");
        t.ingest(mv("R"));
        assert_eq!(t.status(), SessionStatus::Diverged);

        let mut t = tracker("R2");
        t.ingest(Move::new(
            Face::R,
            cubetrack_types::Amount::Half,
            cubetrack_types::Direction::CounterClockwise,
        ));
        assert_eq!(t.status(), SessionStatus::Completed);
    }

    #[test]
    fn eleven_divergent_moves_require_reset() {
        let mut t = tracker("R U");
        for i in 1..=10 {
            t.ingest(mv("L"));
            assert!(!t.should_reset_cube(), "reset too early at depth {}", i);
        }
        let events = t.ingest(mv("L"));
        assert!(t.should_reset_cube());
        assert!(events.contains(&TrackerEvent::ResetRequired { depth: 11 }));
        assert_eq!(t.expected_move(), None);
    }

    #[test]
    fn reset_required_is_terminal() {
        let mut t = tracker("R U");
        feed(&mut t, "L L L L L L L L L L L");
        assert!(t.should_reset_cube());

        // An undo no longer shrinks the stacks.
        t.ingest(mv("L'"));
        assert_eq!(t.session().diverged_moves().len(), 11);
        assert!(t.should_reset_cube());
        assert_eq!(t.status(), SessionStatus::Diverged);
    }

    #[test]
    fn reset_cube_restarts_scramble() {
        let mut t = tracker("R U");
        feed(&mut t, "R L L L L L L L L L L L");
        assert!(t.should_reset_cube());

        t.reset_cube();
        assert_eq!(t.status(), SessionStatus::Scrambling);
        assert!(!t.should_reset_cube());
        assert_eq!(t.session().cursor(), 0);
        assert!(t.session().diverged_moves().is_empty());
        assert!(t.cube().is_solved());
        feed(&mut t, "R U");
        assert_eq!(t.status(), SessionStatus::Completed);
    }

    #[test]
    fn custom_threshold() {
        let mut t = ScrambleTracker::with_config(TrackerConfig {
            reset_threshold: 2,
            ..TrackerConfig::default()
        });
        t.set_scramble("R").unwrap();
        feed(&mut t, "U U");
        assert!(!t.should_reset_cube());
        t.ingest(mv("U"));
        assert!(t.should_reset_cube());
    }

    #[test]
    fn moves_while_idle_or_completed_are_ignored() {
        let mut t = ScrambleTracker::new();
        assert!(t.ingest(mv("R")).is_empty());
        assert!(t.cube().is_solved());

        let mut t = tracker("R");
        feed(&mut t, "R");
        let cube = *t.cube();
        assert!(t.ingest(mv("U")).is_empty());
        assert_eq!(*t.cube(), cube);
        assert_eq!(t.status(), SessionStatus::Completed);
    }

    #[test]
    fn cube_follows_physical_moves() {
        let mut t = tracker("R U");
        feed(&mut t, "R L");
        let expected = CubeState::solved().apply_moves(&[mv("R"), mv("L")]);
        assert_eq!(*t.cube(), expected);
        assert!(!t.session().is_solved());
    }

    #[test]
    fn solving_mid_scramble_is_reported_without_transition() {
        let mut t = tracker("R U");
        t.ingest(mv("R"));
        let events = t.ingest(mv("R'"));
        assert!(events.contains(&TrackerEvent::Solved));
        assert!(t.session().is_solved());
        assert_eq!(t.status(), SessionStatus::Diverged);
    }

    #[test]
    fn ingest_token_rejects_garbage_without_mutation() {
        let mut t = tracker("R U");
        let before = t.session().clone();
        assert!(t.ingest_token("R3").is_err());
        assert_eq!(t.session(), &before);
        let events = t.ingest_token("R").unwrap();
        assert_eq!(
            events,
            vec![TrackerEvent::Advanced {
                index: 0,
                mv: mv("R")
            }]
        );
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut t = tracker("R U");
        feed(&mut t, "R");
        t.clear();
        assert_eq!(t.status(), SessionStatus::Idle);
        assert!(t.session().original_scramble().is_empty());
        assert!(t.is_idle_solved());
    }

    #[test]
    fn split_half_turn_completes_with_two_quarters() {
        let mut t = splitting("R2 U");
        let events = t.ingest(mv("R'"));
        assert_eq!(
            events,
            vec![TrackerEvent::HalfTurnSplit {
                index: 0,
                remaining: mv("R'")
            }]
        );
        let state = t.session().move_states()[0];
        assert_eq!(state.mv, mv("R'"));
        assert!(state.was_modified);
        assert_eq!(t.session().original_scramble()[0], mv("R2"));

        t.ingest(mv("R'"));
        assert_eq!(t.session().cursor(), 1);
        assert_eq!(t.status(), SessionStatus::Scrambling);
    }

    #[test]
    fn split_half_turn_then_reverse_diverges() {
        let mut t = splitting("R2");
        feed(&mut t, "R R'");
        assert_eq!(t.status(), SessionStatus::Diverged);
        assert_eq!(t.expected_move(), Some(mv("R")));
        feed(&mut t, "R R");
        assert_eq!(t.status(), SessionStatus::Completed);
        assert_eq!(*t.cube(), CubeState::solved().apply_move(mv("R2")));
    }

    #[test]
    fn split_recovery_of_half_turn() {
        let mut t = splitting("R");
        t.ingest(mv("U2"));
        assert_eq!(t.expected_move(), Some(mv("U2")));

        t.ingest(mv("U"));
        assert_eq!(t.expected_move(), Some(mv("U")));
        assert_eq!(t.session().diverged_moves(), &[mv("U'")]);

        t.ingest(mv("U"));
        assert_eq!(t.status(), SessionStatus::Scrambling);
        assert!(t.cube().is_solved());
    }

    #[test]
    fn without_split_recovery_needs_half_turn() {
        let mut t = tracker("R");
        t.ingest(mv("U2"));
        t.ingest(mv("U"));
        assert_eq!(t.session().diverged_moves(), &[mv("U2"), mv("U")]);
    }

    #[test]
    fn snapshot_serializes() {
        let mut t = tracker("R U");
        feed(&mut t, "R L");
        let json = serde_json::to_value(t.session()).unwrap();
        assert_eq!(json["status"], "diverged");
        assert_eq!(json["cursor"], 1);
        assert_eq!(json["diverged_moves"][0], "L");
        assert_eq!(json["recovery_moves"][0], "L'");
        assert_eq!(json["move_states"][1]["status"], "recovery");
        assert_eq!(json["move_states"][0]["move"], "R");
        assert_eq!(json["should_reset_cube"], false);
    }

    #[test]
    fn snapshot_reports_progress() {
        let mut t = tracker("R U F");
        feed(&mut t, "R");
        let snap = t.snapshot();
        assert_eq!(snap.status, SessionStatus::Scrambling);
        assert_eq!((snap.completed, snap.total), (1, 3));
        assert_eq!(snap.expected_move, Some(mv("U")));
        assert!(snap.recovery_moves.is_empty());
        assert_eq!(
            snap.facelets,
            CubeState::solved().apply_move(mv("R")).to_facelet_string()
        );
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["expected_move"], "U");
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(TrackerEvent::Diverged {
            mv: mv("L"),
            depth: 1,
        })
        .unwrap();
        assert_eq!(json["event"], "diverged");
        assert_eq!(json["move"], "L");
    }
}
