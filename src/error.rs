//! Fatal playout errors.
//!
//! Both variants mean the board and the policy disagree about the same
//! position. The playout is abandoned and the board snapshot is kept for
//! diagnosis; the caller decides whether to drop the playout or stop.

use crate::board::{GroupId, Point};
use crate::geometry::str_coord;

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A group reports one liberty but none of its stones touches an empty point.
    ///
    /// `step` is filled in once the error leaves a playout; a bare
    /// `compute_policy` call does not know it.
    #[error(
        "{}cannot get the atari point for group {group} ({stones} stones) starting at {}\n{board}",
        step_prefix(.step),
        coord(.start)
    )]
    MissingLiberty {
        step: Option<usize>,
        group: GroupId,
        start: Point,
        stones: u32,
        board: String,
    },

    /// The fallback picked a move from the board's own legal-move list and the
    /// board refused it.
    #[error(
        "[{step}/{max_depth}] move {} cannot be executed ({})\n{board}",
        coord(.mv),
        describe_moves(.candidates)
    )]
    RejectedFallback {
        mv: Point,
        step: usize,
        max_depth: usize,
        candidates: Vec<Point>,
        board: String,
    },
}

impl PolicyError {
    /// Record the playout step at which the error was raised.
    pub fn at_step(mut self, at: usize) -> Self {
        if let PolicyError::MissingLiberty { step, .. } = &mut self {
            *step = Some(at);
        }
        self
    }

    /// Playout step of the error, if known.
    pub fn step(&self) -> Option<usize> {
        match self {
            PolicyError::MissingLiberty { step, .. } => *step,
            PolicyError::RejectedFallback { step, .. } => Some(*step),
        }
    }

    /// Board rendering captured when the error was raised.
    pub fn board(&self) -> &str {
        match self {
            PolicyError::MissingLiberty { board, .. } | PolicyError::RejectedFallback { board, .. } => {
                board
            }
        }
    }
}

fn step_prefix(step: &Option<usize>) -> String {
    step.map(|s| format!("[{s}] ")).unwrap_or_default()
}

fn coord(pt: &Point) -> String {
    str_coord(*pt)
}

fn describe_moves(moves: &[Point]) -> String {
    let list = moves.iter().map(|&m| str_coord(m)).collect::<Vec<_>>().join(" ");
    format!("{} candidate moves: {list}", moves.len())
}
