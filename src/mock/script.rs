use std::collections::VecDeque;

use thiserror::Error;

use crate::game_logic::{Move, Session};
use crate::game_state::Square;

/// Error when parsing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid script token: '{0}'")]
pub struct ParseError(String);

/// One instruction of a move script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    /// Click `from`, then `to`.
    Move { from: Square, to: Square },
    /// Take back the last move.
    Undo,
}

/// What happened when a step was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Played(Move),
    Ignored { from: Square, to: Square },
    Undone(Option<Move>),
}

/// A scriptable player feeding moves into a [`Session`].
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    pending: VecDeque<ScriptStep>,
}

impl ScriptedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - Moves are 4 characters, start square then end square (e.g. "e2e4")
    /// - `z` undoes the last move
    /// - Whitespace separates steps
    ///
    /// A script with any invalid token is rejected as a whole.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let steps = parse_script(script)?;
        self.pending.extend(steps);
        Ok(())
    }

    /// Number of steps still queued.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Apply the next pending step. Returns None if nothing is queued.
    pub fn step(&mut self, session: &mut Session) -> Option<StepOutcome> {
        let outcome = match self.pending.pop_front()? {
            ScriptStep::Move { from, to } => match session.try_move(from, to) {
                Ok(mv) => StepOutcome::Played(mv),
                Err(_) => StepOutcome::Ignored { from, to },
            },
            ScriptStep::Undo => StepOutcome::Undone(session.undo()),
        };
        Some(outcome)
    }

    /// Apply all pending steps, calling the provided callback after each.
    pub fn drain<F>(&mut self, session: &mut Session, mut on_step: F)
    where
        F: FnMut(&Session, StepOutcome),
    {
        while let Some(outcome) = self.step(session) {
            on_step(session, outcome);
        }
    }
}

/// Parse a script string into steps.
fn parse_script(script: &str) -> Result<Vec<ScriptStep>, ParseError> {
    script.split_whitespace().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<ScriptStep, ParseError> {
    if token.eq_ignore_ascii_case("z") {
        return Ok(ScriptStep::Undo);
    }

    let invalid = || ParseError(token.to_string());
    if !token.is_ascii() || token.len() != 4 {
        return Err(invalid());
    }
    let (from, to) = token.split_at(2);
    Ok(ScriptStep::Move {
        from: from.parse().map_err(|_| invalid())?,
        to: to.parse().map_err(|_| invalid())?,
    })
}
