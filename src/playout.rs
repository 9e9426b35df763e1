//! Heuristic playouts (default-policy game simulation).
//!
//! A playout repeatedly asks the policy for candidates, samples a legal one,
//! falls back to a uniformly random legal move when nothing is proposed, and
//! plays it. It stops after two consecutive passes or when the step bound is
//! reached. Scoring the final position is left to the caller.

use log::{debug, trace};

use crate::board::{Board, Region};
use crate::candidates::{Candidate, CandidateSet, MoveType};
use crate::constants::{PASS_MOVE, UNBOUNDED_DEPTH};
use crate::error::PolicyError;
use crate::policy::{DefaultPolicy, sample};

/// Outcome of one playout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Playout {
    /// Last move applied to the board.
    pub last: Candidate,
    /// The game ended with two consecutive passes rather than at the step bound.
    pub game_ended: bool,
    /// Number of moves applied, passes included.
    pub steps: usize,
}

impl DefaultPolicy {
    /// Play the default policy on `board` until two passes in a row or
    /// `max_depth` moves. A negative `max_depth` plays to the end of the game.
    ///
    /// `rand` is the only source of randomness, so a seeded source replays
    /// the same game.
    pub fn run<B: Board>(
        &self,
        board: &mut B,
        region: Option<&dyn Region>,
        max_depth: i32,
        rand: &mut impl FnMut() -> u32,
    ) -> Result<Playout, PolicyError> {
        let max_depth = usize::try_from(max_depth).unwrap_or(UNBOUNDED_DEPTH);
        let mut moves = CandidateSet::new();
        let mut all_moves = Vec::new();
        let mut num_pass = 0;
        let mut last = Candidate::pass();
        let mut steps = 0;

        debug!("start default policy (max depth {max_depth})");

        while steps < max_depth {
            self.compute_policy(board, &mut moves, region)
                .map_err(|e| e.at_step(steps))?;
            trace!("[{steps}] {} candidates", moves.len());

            let (m, staged) = match sample(board, &mut moves, rand) {
                Some(found) => found,
                None => {
                    // Fall back to a uniformly random legal move.
                    board.legal_moves(region, self.params().thres_allow_atari_stone, &mut all_moves);
                    let pt = if all_moves.is_empty() {
                        PASS_MOVE
                    } else {
                        all_moves[rand() as usize % all_moves.len()]
                    };
                    let m = Candidate::with_gamma(pt, MoveType::Normal, 0.0);
                    match board.try_play(pt) {
                        Some(staged) => (m, staged),
                        None => {
                            return Err(PolicyError::RejectedFallback {
                                mv: pt,
                                step: steps,
                                max_depth,
                                candidates: all_moves,
                                board: board.to_string(),
                            });
                        }
                    }
                }
            };

            trace!(
                "[{steps}] {} plays {} ({}, gamma={})",
                board.to_play(),
                board.coord_str(m.pt),
                m.kind,
                m.gamma
            );
            board.play(staged);
            steps += 1;
            last = m;

            if m.pt == PASS_MOVE {
                num_pass += 1;
                if num_pass == 2 {
                    break;
                }
            } else {
                num_pass = 0;
            }
        }

        debug!("finish default policy after {steps} moves");
        Ok(Playout {
            last,
            game_ended: num_pass == 2,
            steps,
        })
    }
}
