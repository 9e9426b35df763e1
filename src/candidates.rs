//! Weighted move candidates for a single playout decision.

use std::fmt;

use crate::board::Point;
use crate::constants::{DEFAULT_GAMMA, PASS_MOVE};
use crate::geometry::str_coord;

/// Why a candidate move was proposed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveType {
    /// Contested capture (ko fight).
    KoFight,
    /// An opponent group short of liberties.
    OpponentInDanger,
    /// Saving one of our groups from atari.
    OurAtari,
    /// Vital point of an enclosed dead shape.
    Nakade,
    /// Local 3x3 pattern.
    Pattern,
    /// Plain move from the uniform fallback.
    Normal,
}

impl MoveType {
    pub const COUNT: usize = 6;

    pub const ALL: [MoveType; MoveType::COUNT] = [
        MoveType::KoFight,
        MoveType::OpponentInDanger,
        MoveType::OurAtari,
        MoveType::Nakade,
        MoveType::Pattern,
        MoveType::Normal,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            MoveType::KoFight => "ko_fight",
            MoveType::OpponentInDanger => "opponent_in_danger",
            MoveType::OurAtari => "our_atari",
            MoveType::Nakade => "nakade",
            MoveType::Pattern => "pattern",
            MoveType::Normal => "normal",
        }
    }

    pub fn from_name(name: &str) -> Option<MoveType> {
        MoveType::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A proposed move with its sampling weight.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub pt: Point,
    pub kind: MoveType,
    /// Non-negative sampling weight.
    pub gamma: f32,
}

impl Candidate {
    pub fn new(pt: Point, kind: MoveType) -> Self {
        Self {
            pt,
            kind,
            gamma: DEFAULT_GAMMA,
        }
    }

    pub fn with_gamma(pt: Point, kind: MoveType, gamma: f32) -> Self {
        debug_assert!(gamma >= 0.0, "negative gamma {gamma}");
        Self { pt, kind, gamma }
    }

    pub fn pass() -> Self {
        Self::with_gamma(PASS_MOVE, MoveType::Normal, 0.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, gamma={}]", str_coord(self.pt), self.kind, self.gamma)
    }
}

/// Candidate moves collected for one decision point.
///
/// The set only ever grows by [`add`](Self::add) and shrinks by
/// [`remove`](Self::remove); it is cleared before each decision so its
/// storage can be reused for the whole playout.
#[derive(Clone, Debug, Default)]
pub struct CandidateSet {
    moves: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn add(&mut self, m: Candidate) {
        self.moves.push(m);
    }

    /// Strike a candidate; the following ones shift down by one index.
    pub fn remove(&mut self, i: usize) -> Candidate {
        self.moves.remove(i)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.moves
    }

    pub fn contains(&self, pt: Point) -> bool {
        self.moves.iter().any(|m| m.pt == pt)
    }

    /// Draw a weighted random index, `None` if the set is empty.
    ///
    /// One draw from `rand` is scaled onto the total weight. When every
    /// weight is zero the draw falls back to a uniform index.
    pub fn sample(&self, rand: &mut impl FnMut() -> u32) -> Option<usize> {
        if self.moves.is_empty() {
            return None;
        }

        let total: f64 = self.moves.iter().map(|m| m.gamma as f64).sum();
        let r = rand();
        if total <= 0.0 {
            return Some(r as usize % self.moves.len());
        }

        let target = r as f64 / (u32::MAX as f64 + 1.0) * total;
        let mut acc = 0.0;
        for (i, m) in self.moves.iter().enumerate() {
            acc += m.gamma as f64;
            if target < acc {
                return Some(i);
            }
        }
        // Rounding can leave `target` on the upper boundary.
        self.moves.iter().rposition(|m| m.gamma > 0.0)
    }
}

impl std::ops::Index<usize> for CandidateSet {
    type Output = Candidate;

    fn index(&self, i: usize) -> &Candidate {
        &self.moves[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::parse_coord;

    fn set_of(moves: &[(&str, f32)]) -> CandidateSet {
        let mut set = CandidateSet::new();
        for &(s, gamma) in moves {
            set.add(Candidate::with_gamma(parse_coord(s), MoveType::Pattern, gamma));
        }
        set
    }

    #[test]
    fn test_sample_empty() {
        let set = CandidateSet::new();
        let mut rand = || 7;
        assert_eq!(set.sample(&mut rand), None);
    }

    #[test]
    fn test_sample_singleton_is_deterministic() {
        let set = set_of(&[("E5", 1.0)]);
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..100 {
            assert_eq!(set.sample(&mut || rng.u32(..)), Some(0));
        }
    }

    #[test]
    fn test_sample_skips_zero_weight() {
        let set = set_of(&[("A1", 0.0), ("B1", 2.0), ("C1", 0.0)]);
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..100 {
            assert_eq!(set.sample(&mut || rng.u32(..)), Some(1));
        }
        // Extreme draws stay on the only weighted entry.
        assert_eq!(set.sample(&mut || 0), Some(1));
        assert_eq!(set.sample(&mut || u32::MAX), Some(1));
    }

    #[test]
    fn test_sample_follows_weights() {
        let set = set_of(&[("A1", 1.0), ("B1", 3.0)]);
        // The lower quarter of the draw range lands on the first entry.
        assert_eq!(set.sample(&mut || 0), Some(0));
        assert_eq!(set.sample(&mut || u32::MAX / 8), Some(0));
        assert_eq!(set.sample(&mut || u32::MAX / 2), Some(1));

        let mut rng = fastrand::Rng::with_seed(5);
        let mut hits = [0u32; 2];
        for _ in 0..4000 {
            let i = set.sample(&mut || rng.u32(..)).unwrap();
            hits[i] += 1;
        }
        assert!(hits[1] > 2 * hits[0], "weights ignored: {hits:?}");
    }

    #[test]
    fn test_sample_all_zero_is_uniform() {
        let set = set_of(&[("A1", 0.0), ("B1", 0.0), ("C1", 0.0)]);
        assert_eq!(set.sample(&mut || 4), Some(1));
        assert_eq!(set.sample(&mut || 2), Some(2));
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut set = set_of(&[("A1", 1.0), ("B1", 1.0), ("C1", 1.0)]);
        let removed = set.remove(0);
        assert_eq!(removed.pt, parse_coord("A1"));
        assert_eq!(set.len(), 2);
        assert_eq!(set[0].pt, parse_coord("B1"));
        assert!(!set.contains(parse_coord("A1")));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_move_type_names() {
        for t in MoveType::ALL {
            assert_eq!(MoveType::from_name(t.name()), Some(t));
            assert_eq!(MoveType::ALL[t.index()], t);
        }
        assert_eq!(MoveType::from_name("ladder"), None);
    }
}
