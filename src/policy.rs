//! Tactical heuristics and candidate sampling for playouts.
//!
//! At every decision point [`DefaultPolicy::compute_policy`] rebuilds the
//! candidate set from the enabled heuristics, in this order:
//!
//! 1. ko fight (not implemented yet, proposes nothing)
//! 2. opponent groups short of liberties
//! 3. our own groups in atari
//! 4. the vital point of a small eye space next to the last move
//! 5. 3x3 patterns (not implemented yet, proposes nothing)
//!
//! Heuristics only add candidates; one firing never hides another.
//! [`sample`] then picks a legal candidate, striking illegal ones as it goes.

use std::fmt;

use log::trace;

use crate::board::{Board, Cell, GroupId, Point, Region, group_in_region, in_region};
use crate::candidates::{Candidate, CandidateSet, MoveType};
use crate::constants::*;
use crate::error::PolicyError;
use crate::nakade::nakade_point;
use crate::geometry::{is_neighbor8, neighbors};

/// Per-playout configuration of the default policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyParams {
    /// Enable flag for each heuristic, indexed by [`MoveType::index`].
    pub switches: [bool; MoveType::COUNT],
    /// Self-atari fallback moves are allowed up to this many stones.
    pub thres_allow_atari_stone: u32,
    /// Minimum stones for an own group in atari to be saved.
    pub thres_save_atari: u32,
    /// Opponent groups with at most this many liberties are attacked.
    pub thres_opponent_libs: u32,
    /// Opponent groups need at least this many stones to be attacked.
    pub thres_opponent_stones: u32,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            switches: [true; MoveType::COUNT],
            thres_allow_atari_stone: DEFAULT_THRES_ALLOW_ATARI_STONE,
            thres_save_atari: DEFAULT_THRES_SAVE_ATARI,
            thres_opponent_libs: DEFAULT_THRES_OPPONENT_LIBS,
            thres_opponent_stones: DEFAULT_THRES_OPPONENT_STONES,
        }
    }
}

impl PolicyParams {
    #[inline]
    pub fn enabled(&self, kind: MoveType) -> bool {
        self.switches[kind.index()]
    }

    pub fn set_enabled(&mut self, kind: MoveType, on: bool) {
        self.switches[kind.index()] = on;
    }
}

impl fmt::Display for PolicyParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in MoveType::ALL {
            writeln!(f, "{}: {} {}", kind.index(), kind, self.enabled(kind))?;
        }
        writeln!(f, "thres_allow_atari_stone: {}", self.thres_allow_atari_stone)?;
        writeln!(f, "thres_save_atari: {}", self.thres_save_atari)?;
        writeln!(f, "thres_opponent_libs: {}", self.thres_opponent_libs)?;
        writeln!(f, "thres_opponent_stones: {}", self.thres_opponent_stones)
    }
}

/// The rollout policy. Holds only its parameters; all state lives in the
/// board and candidate set passed to each call.
#[derive(Clone, Debug, Default)]
pub struct DefaultPolicy {
    params: PolicyParams,
}

impl DefaultPolicy {
    pub fn new(params: PolicyParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &PolicyParams {
        &self.params
    }

    /// Rebuild `moves` from the enabled heuristics for the player to move.
    pub fn compute_policy<B: Board>(
        &self,
        board: &B,
        moves: &mut CandidateSet,
        region: Option<&dyn Region>,
    ) -> Result<(), PolicyError> {
        moves.clear();

        if self.params.enabled(MoveType::KoFight) {
            self.check_ko_fight(board, moves, region);
        }
        if self.params.enabled(MoveType::OpponentInDanger) {
            self.check_opponent_in_danger(board, moves, region);
        }
        if self.params.enabled(MoveType::OurAtari) {
            self.check_our_atari(board, moves, region)?;
        }
        if self.params.enabled(MoveType::Nakade) {
            self.check_nakade(board, moves, region);
        }
        if self.params.enabled(MoveType::Pattern) {
            self.check_pattern(board, moves, region);
        }
        Ok(())
    }

    // TODO: propose ko recaptures once the board tracks ko age.
    fn check_ko_fight<B: Board>(&self, _board: &B, _moves: &mut CandidateSet, _region: Option<&dyn Region>) {}

    /// Propose every liberty of opponent groups that are short of liberties.
    fn check_opponent_in_danger<B: Board>(
        &self,
        board: &B,
        moves: &mut CandidateSet,
        region: Option<&dyn Region>,
    ) {
        let opponent = board.to_play().opponent();
        for id in 0..board.num_groups() {
            let g = board.group(id);
            if g.color != opponent
                || g.liberties > self.params.thres_opponent_libs
                || g.stones < self.params.thres_opponent_stones
            {
                continue;
            }
            if !group_in_region(board, id, region) {
                continue;
            }
            add_group_liberties(board, id, moves, MoveType::OpponentInDanger);
        }
    }

    /// Propose extending our groups in atari, unless the extension is hopeless.
    fn check_our_atari<B: Board>(
        &self,
        board: &B,
        moves: &mut CandidateSet,
        region: Option<&dyn Region>,
    ) -> Result<(), PolicyError> {
        let me = board.to_play();
        for id in 0..board.num_groups() {
            let g = board.group(id);
            if g.color != me || g.liberties != 1 || g.stones < self.params.thres_save_atari {
                continue;
            }
            if !group_in_region(board, id, region) {
                continue;
            }

            let Some(c) = find_liberty(board, id) else {
                return Err(PolicyError::MissingLiberty {
                    step: None,
                    group: id,
                    start: g.start,
                    stones: g.stones,
                    board: board.to_string(),
                });
            };

            // Extending only helps if it gains a liberty or joins a healthy group.
            let mut liberty = 0;
            let mut group_rescue = 0;
            for cc in neighbors(c) {
                match board.cell(cc) {
                    Cell::Empty => liberty += 1,
                    Cell::Stone(color) if color == me => {
                        if let Some(other) = board.group_id(cc) {
                            if board.group(other).liberties > 2 {
                                group_rescue += 1;
                            }
                        }
                    }
                    _ => {}
                }
            }
            if liberty > 0 || group_rescue > 0 {
                moves.add(Candidate::new(c, MoveType::OurAtari));
            }
        }
        Ok(())
    }

    /// Play the vital point of an eye space the last move just enclosed.
    fn check_nakade<B: Board>(&self, board: &B, moves: &mut CandidateSet, region: Option<&dyn Region>) {
        let last = board.last_move();
        if last == PASS_MOVE || !in_region(region, last) {
            return;
        }

        let mut empty = None;
        for c in neighbors(last) {
            if !board.cell(c).is_empty() {
                continue;
            }
            match empty {
                None => empty = Some(c),
                // Empty points on both sides: not a single eye space.
                Some(e) if !is_neighbor8(c, e) => return,
                Some(_) => {}
            }
        }

        if let Some(vital) = empty.and_then(|e| nakade_point(board, e)) {
            moves.add(Candidate::new(vital, MoveType::Nakade));
        }
    }

    // TODO: score moves with the 3x3 pattern prior and set their gamma.
    fn check_pattern<B: Board>(&self, _board: &B, _moves: &mut CandidateSet, _region: Option<&dyn Region>) {}
}

/// Add the liberties of group `id`, one candidate per distinct point.
fn add_group_liberties<B: Board>(board: &B, id: GroupId, moves: &mut CandidateSet, kind: MoveType) {
    let lib_count = board.group(id).liberties as usize;
    if lib_count == 0 {
        return;
    }
    let first = moves.len();

    'stones: for stone in board.group_stones(id) {
        for c in neighbors(stone) {
            if !board.cell(c).is_empty() || moves.as_slice()[first..].iter().any(|m| m.pt == c) {
                continue;
            }
            moves.add(Candidate::new(c, kind));
            if moves.len() - first == lib_count {
                break 'stones;
            }
        }
    }
}

/// First empty point next to a stone of group `id`.
fn find_liberty<B: Board>(board: &B, id: GroupId) -> Option<Point> {
    board
        .group_stones(id)
        .flat_map(neighbors)
        .find(|&c| board.cell(c).is_empty())
}

/// Draw candidates by weight until one is legal on `board`.
///
/// Illegal draws are removed from `moves` for good. Returns `None` once the
/// set is exhausted; otherwise the chosen candidate and its staged move.
pub fn sample<B: Board>(
    board: &B,
    moves: &mut CandidateSet,
    rand: &mut impl FnMut() -> u32,
) -> Option<(Candidate, B::Staged)> {
    let mut count = 0;
    loop {
        let i = moves.sample(rand)?;
        let m = moves[i];
        trace!("sample step {count}: {m}");

        if let Some(staged) = board.try_play(m.pt) {
            return Some((m, staged));
        }
        moves.remove(i);
        count += 1;
    }
}

/// Cheaper variant of [`sample`]: one uniform draw, one legality check, no retry.
pub fn simple_sample<B: Board>(
    board: &B,
    moves: &CandidateSet,
    rand: &mut impl FnMut() -> u32,
) -> Option<(Candidate, B::Staged)> {
    if moves.is_empty() {
        return None;
    }
    let m = moves[rand() as usize % moves.len()];
    board.try_play(m.pt).map(|staged| (m, staged))
}
