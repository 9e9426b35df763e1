//! Board and region capabilities consumed by the default policy.
//!
//! The policy never looks inside a concrete board. Everything it needs, from
//! group bookkeeping to transactional move application and legal-move
//! enumeration, goes through the [`Board`] trait, so alternative board
//! representations can be plugged in. [`Position`](crate::position::Position)
//! is the implementation shipped with this crate.

use std::fmt;

use crate::constants::PASS_MOVE;
use crate::geometry::{coord_xy, str_coord};

/// A point on the board, represented as an index into the padded 1D array.
pub type Point = usize;

/// Identifier of a group, valid until the board changes.
pub type GroupId = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "B"),
            Color::White => write!(f, "W"),
        }
    }
}

/// Content of a single cell of the padded board array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Stone(Color),
    /// Padding around the playable area.
    Out,
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    #[inline]
    pub fn stone(self) -> Option<Color> {
        match self {
            Cell::Stone(c) => Some(c),
            _ => None,
        }
    }
}

/// Summary of a connected group of same-colored stones.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    pub stones: u32,
    pub liberties: u32,
    /// Representative stone of the group.
    pub start: Point,
}

impl Group {
    pub const EMPTY: Group = Group {
        color: Color::Black,
        stones: 0,
        liberties: 0,
        start: PASS_MOVE,
    };
}

/// Query and move-application capabilities of a Go board.
///
/// `try_play` must not have side effects; the staged result is committed
/// with `play`. A pass is always legal.
pub trait Board: fmt::Display {
    /// A move that has been checked for legality but not yet committed.
    type Staged;

    /// Color of the player to move.
    fn to_play(&self) -> Color;

    /// Last move played, or `PASS_MOVE`.
    fn last_move(&self) -> Point;

    fn cell(&self, pt: Point) -> Cell;

    /// Group owning the stone at `pt`, `None` for empty or padding points.
    fn group_id(&self, pt: Point) -> Option<GroupId>;

    /// Group ids range over `0..num_groups()`.
    fn num_groups(&self) -> usize;

    fn group(&self, id: GroupId) -> Group;

    fn group_stones(&self, id: GroupId) -> impl Iterator<Item = Point> + '_;

    /// Check a move for the player to move without changing the board.
    fn try_play(&self, pt: Point) -> Option<Self::Staged>;

    /// Commit a move returned by `try_play` on this same board.
    fn play(&mut self, staged: Self::Staged);

    /// Fill `out` with every legal move for the player to move inside
    /// `region`, leaving out self-atari moves whose resulting group would
    /// have more than `max_self_atari_stones` stones.
    fn legal_moves(
        &self,
        region: Option<&dyn Region>,
        max_self_atari_stones: u32,
        out: &mut Vec<Point>,
    );

    /// Point that may not be retaken this turn because of ko.
    fn simple_ko(&self) -> Point {
        PASS_MOVE
    }

    fn coord_str(&self, pt: Point) -> String {
        str_coord(pt)
    }
}

/// A spatial restriction of the board.
pub trait Region {
    fn contains(&self, pt: Point) -> bool;
}

impl<F: Fn(Point) -> bool> Region for F {
    fn contains(&self, pt: Point) -> bool {
        self(pt)
    }
}

/// Axis-aligned rectangle, inclusive on all sides.
///
/// Columns count from 1 at the left edge, rows from 1 at the top edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl Rect {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

impl Region for Rect {
    fn contains(&self, pt: Point) -> bool {
        if pt == PASS_MOVE {
            return false;
        }
        let (x, y) = coord_xy(pt);
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

/// Whether `pt` lies in `region`; no region means the whole board.
#[inline]
pub fn in_region(region: Option<&dyn Region>, pt: Point) -> bool {
    region.is_none_or(|r| r.contains(pt))
}

/// Whether any stone of group `id` lies in `region`.
pub fn group_in_region<B: Board>(board: &B, id: GroupId, region: Option<&dyn Region>) -> bool {
    match region {
        None => true,
        Some(r) => board.group_stones(id).any(|pt| r.contains(pt)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::parse_coord;

    #[test]
    fn test_rect_contains() {
        // A1 is the bottom-left corner, i.e. the last row from the top.
        let corner = Rect::new(1, crate::constants::N - 2, 3, crate::constants::N);
        assert!(corner.contains(parse_coord("A1")));
        assert!(corner.contains(parse_coord("C3")));
        assert!(!corner.contains(parse_coord("D3")));
        assert!(!corner.contains(parse_coord("C4")));
        assert!(!corner.contains(PASS_MOVE));
    }

    #[test]
    fn test_in_region() {
        let pt = parse_coord("E5");
        assert!(in_region(None, pt));
        let nowhere = |_: Point| false;
        assert!(!in_region(Some(&nowhere), pt));
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent(), Color::Black);
    }
}
