//! Go position representation and move execution.
//!
//! This module provides the board collaborator used by the default policy:
//! - Board state using a 1D array with padding
//! - A group table (stones, liberties, representative point) rebuilt after every move
//! - Stone placement, capture detection and simple ko
//! - Eye detection so playouts do not fill their own eyes
//!
//! Unlike a color-swapping board, stones keep their absolute color and the
//! side to move is stored explicitly in [`Position::to_play`].

use std::fmt;

use crate::board::{Board, Cell, Color, Group, GroupId, Point, Region, in_region};
use crate::constants::*;
use crate::geometry::{column_letter, diagonal_neighbors, neighbors, parse_coord, str_coord};

/// Result of attempting to play a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Error Illegal move: point not EMPTY")]
    Occupied,
    #[error("Error Illegal move: retakes ko")]
    Ko,
    #[error("Error Illegal move: suicide")]
    Suicide,
}

const NO_GROUP: u16 = u16::MAX;

/// A Go position (board state).
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    cells: [Cell; BOARDSIZE],
    group_of: [u16; BOARDSIZE],
    groups: [Group; MAX_GROUPS],
    num_groups: usize,
    /// Player to move
    pub to_play: Color,
    /// Move number (0 = start of game)
    pub n: usize,
    /// Ko point (`PASS_MOVE` if no ko)
    pub ko: Point,
    /// Last move played
    pub last: Point,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    pub fn new() -> Self {
        let mut p = Position {
            cells: [Cell::Out; BOARDSIZE],
            group_of: [NO_GROUP; BOARDSIZE],
            groups: [Group::EMPTY; MAX_GROUPS],
            num_groups: 0,
            to_play: Color::Black,
            n: 0,
            ko: PASS_MOVE,
            last: PASS_MOVE,
        };
        empty_position(&mut p);
        p
    }

    /// Place stones directly, ignoring captures (the "debug setpos" of GTP engines).
    ///
    /// Black is to move afterwards and no move is recorded as played.
    pub fn setup(black: &[&str], white: &[&str]) -> Result<Self, MoveError> {
        let mut pos = Position::new();
        for (coords, color) in [(black, Color::Black), (white, Color::White)] {
            for s in coords {
                let pt = parse_coord(s);
                if pos.cells[pt] != Cell::Empty {
                    return Err(MoveError::Occupied);
                }
                pos.cells[pt] = Cell::Stone(color);
            }
        }
        pos.rebuild_groups();
        Ok(pos)
    }

    /// Recompute group membership, stone counts and liberties from scratch.
    fn rebuild_groups(&mut self) {
        self.group_of = [NO_GROUP; BOARDSIZE];
        self.num_groups = 0;

        // Liberty marks are stamped with the group id, so they never need clearing.
        let mut lib_mark = [NO_GROUP; BOARDSIZE];
        let mut stack = [PASS_MOVE; BOARDSIZE];

        for pt in BOARD_IMIN..BOARD_IMAX {
            let Cell::Stone(color) = self.cells[pt] else {
                continue;
            };
            if self.group_of[pt] != NO_GROUP {
                continue;
            }

            let id = self.num_groups as u16;
            let mut group = Group {
                color,
                stones: 0,
                liberties: 0,
                start: pt,
            };
            self.group_of[pt] = id;
            stack[0] = pt;
            let mut sp = 1;

            while sp > 0 {
                sp -= 1;
                let cur = stack[sp];
                group.stones += 1;
                for n in neighbors(cur) {
                    match self.cells[n] {
                        Cell::Empty => {
                            if lib_mark[n] != id {
                                lib_mark[n] = id;
                                group.liberties += 1;
                            }
                        }
                        Cell::Stone(c) if c == color && self.group_of[n] == NO_GROUP => {
                            self.group_of[n] = id;
                            stack[sp] = n;
                            sp += 1;
                        }
                        _ => {}
                    }
                }
            }

            self.groups[self.num_groups] = group;
            self.num_groups += 1;
        }
    }
}

/// Reset a position to the initial empty board state.
///
/// The board is laid out as a 1D array with padding:
/// - Index 0 to N: top padding (out of bounds)
/// - Each row: left padding + N playable points
/// - Bottom padding
pub fn empty_position(pos: &mut Position) {
    let mut k = 0;
    for _col in 0..=N {
        pos.cells[k] = Cell::Out;
        k += 1;
    }
    for _row in 1..=N {
        pos.cells[k] = Cell::Out;
        k += 1;
        for _col in 1..=N {
            pos.cells[k] = Cell::Empty;
            k += 1;
        }
    }
    for _col in 0..W {
        pos.cells[k] = Cell::Out;
        k += 1;
    }
    pos.group_of = [NO_GROUP; BOARDSIZE];
    pos.num_groups = 0;
    pos.to_play = Color::Black;
    pos.ko = PASS_MOVE;
    pos.last = PASS_MOVE;
    pos.n = 0;
}

/// Execute a pass move.
///
/// This increments the move counter, hands the turn over, and clears the ko.
pub fn pass_move(pos: &mut Position) {
    pos.to_play = pos.to_play.opponent();
    pos.n += 1;
    pos.last = PASS_MOVE;
    pos.ko = PASS_MOVE;
}

/// Check if a point is "eyeish" (surrounded by stones of one color).
///
/// Out-of-bounds neighbors are ignored. Returns the color of the surrounding
/// stones. Note: this may return a color for false eyes.
pub fn is_eyeish(pos: &Position, pt: Point) -> Option<Color> {
    let mut eyecolor = None;
    for n in neighbors(pt) {
        match pos.cells[n] {
            Cell::Out => continue,
            Cell::Empty => return None,
            Cell::Stone(c) => match eyecolor {
                None => eyecolor = Some(c),
                Some(e) if e != c => return None,
                _ => {}
            },
        }
    }
    eyecolor
}

/// Check if a point is a true eye.
///
/// A true eye is eyeish and has at most one "bad" diagonal at the edge,
/// none in the center. A diagonal is bad if it holds an opponent stone.
pub fn is_eye(pos: &Position, pt: Point) -> Option<Color> {
    let eyecolor = is_eyeish(pos, pt)?;
    let falsecolor = Cell::Stone(eyecolor.opponent());
    let mut at_edge = false;
    let mut false_count = 0;

    for d in diagonal_neighbors(pt) {
        if pos.cells[d] == Cell::Out {
            at_edge = true;
        } else if pos.cells[d] == falsecolor {
            false_count += 1;
        }
    }

    let tolerance = if at_edge { 1 } else { 0 };
    if false_count > tolerance {
        return None;
    }
    Some(eyecolor)
}

/// Play a move for the side to move.
///
/// Handles pass moves, legality checking, captures and ko detection.
/// The position is left untouched when the move is illegal.
pub fn play_move(pos: &mut Position, pt: Point) -> Result<(), MoveError> {
    if pt == PASS_MOVE {
        pass_move(pos);
        return Ok(());
    }
    if pos.cells[pt] != Cell::Empty {
        return Err(MoveError::Occupied);
    }
    if pt == pos.ko {
        return Err(MoveError::Ko);
    }

    let me = pos.to_play;
    let in_enemy_eye = is_eyeish(pos, pt) == Some(me.opponent());

    // Liberty counts are those before the stone lands on `pt`.
    let mut escapes = false;
    let mut captured = 0u32;
    let mut capture_point = PASS_MOVE;
    let mut doomed = [NO_GROUP; 4];
    let mut num_doomed = 0;

    for n in neighbors(pt) {
        match pos.cells[n] {
            Cell::Empty => escapes = true,
            Cell::Stone(c) => {
                let id = pos.group_of[n];
                let g = pos.groups[id as usize];
                if c == me {
                    if g.liberties > 1 {
                        escapes = true;
                    }
                } else if g.liberties == 1 && !doomed[..num_doomed].contains(&id) {
                    doomed[num_doomed] = id;
                    num_doomed += 1;
                    captured += g.stones;
                    capture_point = n;
                }
            }
            Cell::Out => {}
        }
    }

    if captured == 0 && !escapes {
        return Err(MoveError::Suicide);
    }

    pos.cells[pt] = Cell::Stone(me);
    for &id in &doomed[..num_doomed] {
        for p in BOARD_IMIN..BOARD_IMAX {
            if pos.group_of[p] == id {
                pos.cells[p] = Cell::Empty;
            }
        }
    }

    // Ko only arises when a single stone is taken from inside an enemy eye.
    pos.ko = if captured == 1 && in_enemy_eye {
        capture_point
    } else {
        PASS_MOVE
    };

    pos.to_play = me.opponent();
    pos.n += 1;
    pos.last = pt;
    pos.rebuild_groups();
    Ok(())
}

impl Board for Position {
    type Staged = Position;

    fn to_play(&self) -> Color {
        self.to_play
    }

    fn last_move(&self) -> Point {
        self.last
    }

    #[inline]
    fn cell(&self, pt: Point) -> Cell {
        self.cells[pt]
    }

    #[inline]
    fn group_id(&self, pt: Point) -> Option<GroupId> {
        match self.group_of[pt] {
            NO_GROUP => None,
            id => Some(id as GroupId),
        }
    }

    fn num_groups(&self) -> usize {
        self.num_groups
    }

    #[inline]
    fn group(&self, id: GroupId) -> Group {
        self.groups[id]
    }

    fn group_stones(&self, id: GroupId) -> impl Iterator<Item = Point> + '_ {
        (BOARD_IMIN..BOARD_IMAX).filter(move |&pt| self.group_of[pt] as usize == id)
    }

    fn try_play(&self, pt: Point) -> Option<Position> {
        let mut next = self.clone();
        play_move(&mut next, pt).ok()?;
        Some(next)
    }

    fn play(&mut self, staged: Position) {
        *self = staged;
    }

    fn legal_moves(
        &self,
        region: Option<&dyn Region>,
        max_self_atari_stones: u32,
        out: &mut Vec<Point>,
    ) {
        out.clear();
        for pt in BOARD_IMIN..BOARD_IMAX {
            if self.cells[pt] != Cell::Empty || !in_region(region, pt) {
                continue;
            }
            // Never fill our own true eyes.
            if is_eye(self, pt) == Some(self.to_play) {
                continue;
            }
            let Some(next) = self.try_play(pt) else {
                continue;
            };
            if let Some(id) = next.group_id(pt) {
                let g = next.group(id);
                if g.liberties == 1 && g.stones > max_self_atari_stones {
                    continue;
                }
            }
            out.push(pt);
        }
    }

    fn simple_ko(&self) -> Point {
        self.ko
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Move: {}  To play: {}  Last: {}  Ko: {}",
            self.n,
            self.to_play,
            str_coord(self.last),
            str_coord(self.ko)
        )?;
        for row in 1..=N {
            write!(f, "{:>2} ", N + 1 - row)?;
            for col in 1..=N {
                let pt = row * (N + 1) + col;
                let ch = match self.cells[pt] {
                    Cell::Stone(Color::Black) => 'X',
                    Cell::Stone(Color::White) => 'O',
                    _ => '.',
                };
                let sep = if pt == self.last { ')' } else { ' ' };
                write!(f, "{ch}{sep}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 1..=N {
            write!(f, "{} ", column_letter(col))?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_position() {
        let pos = Position::new();
        let center = (N / 2 + 1) * (N + 1) + (N / 2 + 1);
        assert_eq!(pos.cell(center), Cell::Empty);
        assert_eq!(pos.cell(PASS_MOVE), Cell::Out);
        assert_eq!(pos.n, 0);
        assert_eq!(pos.ko, PASS_MOVE);
        assert_eq!(pos.num_groups(), 0);
        assert_eq!(pos.to_play, Color::Black);
    }

    #[test]
    fn test_play_move_basic() {
        let mut pos = Position::new();
        let pt = parse_coord("D4");
        assert_eq!(play_move(&mut pos, pt), Ok(()));
        assert_eq!(pos.n, 1);
        assert_eq!(pos.last, pt);
        assert_eq!(pos.to_play, Color::White);
        assert_eq!(pos.cell(pt), Cell::Stone(Color::Black));
        assert_eq!(play_move(&mut pos, pt), Err(MoveError::Occupied));
    }

    #[test]
    fn test_play_move_suicide() {
        // Black owns the corner; White playing A1 has no liberties.
        let mut pos = Position::setup(&["A2", "B1"], &[]).unwrap();
        pass_move(&mut pos);
        let before = pos.clone();
        assert_eq!(play_move(&mut pos, parse_coord("A1")), Err(MoveError::Suicide));
        assert_eq!(pos, before, "illegal move must not change the position");
    }

    #[test]
    fn test_capture() {
        let mut pos = Position::setup(&["C4", "E4", "D5"], &["D4"]).unwrap();
        let d4 = parse_coord("D4");
        assert_eq!(pos.group(pos.group_id(d4).unwrap()).liberties, 1);

        assert_eq!(play_move(&mut pos, parse_coord("D3")), Ok(()));
        assert_eq!(pos.cell(d4), Cell::Empty);
        assert_eq!(pos.group_id(d4), None);
        assert_eq!(pos.ko, PASS_MOVE, "capture outside an eye is not ko");
    }

    #[test]
    fn test_ko_rule() {
        let mut pos = Position::setup(&["D5", "C4", "D3"], &["E5", "F4", "E3", "D4"]).unwrap();
        let d4 = parse_coord("D4");
        let e4 = parse_coord("E4");

        assert_eq!(play_move(&mut pos, e4), Ok(()));
        assert_eq!(pos.cell(d4), Cell::Empty);
        assert_eq!(pos.ko, d4);
        assert_eq!(pos.simple_ko(), d4);

        // White may not retake immediately.
        assert_eq!(play_move(&mut pos, d4), Err(MoveError::Ko));

        // A pass clears the ko.
        pass_move(&mut pos);
        assert_eq!(pos.ko, PASS_MOVE);
    }

    #[test]
    fn test_group_table() {
        let pos = Position::setup(&["D4", "D5", "E4"], &["A1"]).unwrap();
        assert_eq!(pos.num_groups(), 2);

        let black = pos.group(pos.group_id(parse_coord("D4")).unwrap());
        assert_eq!(black.color, Color::Black);
        assert_eq!(black.stones, 3);
        assert_eq!(black.liberties, 7);

        let white_id = pos.group_id(parse_coord("A1")).unwrap();
        let white = pos.group(white_id);
        assert_eq!(white.stones, 1);
        assert_eq!(white.liberties, 2);
        assert_eq!(white.start, parse_coord("A1"));
        assert_eq!(pos.group_stones(white_id).collect::<Vec<_>>(), vec![parse_coord("A1")]);
    }

    #[test]
    fn test_is_eye() {
        let pos = Position::new();
        assert_eq!(is_eye(&pos, parse_coord("A1")), None);

        let pos = Position::setup(&["A2", "B1", "B2"], &[]).unwrap();
        assert_eq!(is_eyeish(&pos, parse_coord("A1")), Some(Color::Black));
        assert_eq!(is_eye(&pos, parse_coord("A1")), Some(Color::Black));

        // Two bad diagonals make a false eye in the center.
        let pos = Position::setup(&["D5", "C4", "E4", "D3"], &["C5", "E3"]).unwrap();
        assert_eq!(is_eyeish(&pos, parse_coord("D4")), Some(Color::Black));
        assert_eq!(is_eye(&pos, parse_coord("D4")), None);
    }

    #[test]
    fn test_legal_moves_skip_own_eye_and_suicide() {
        let mut pos = Position::setup(&["A2", "B1", "B2"], &[]).unwrap();
        let a1 = parse_coord("A1");
        let mut moves = Vec::new();

        pos.legal_moves(None, 3, &mut moves);
        assert!(!moves.contains(&a1), "Black must not fill its own eye");
        assert_eq!(moves.len(), N * N - 4);

        pass_move(&mut pos);
        pos.legal_moves(None, 3, &mut moves);
        assert!(!moves.contains(&a1), "A1 is suicide for White");
    }

    #[test]
    fn test_legal_moves_self_atari_guard() {
        let pos = Position::setup(&[], &["A2", "C1", "B2"]).unwrap();
        let b1 = parse_coord("B1");
        let mut moves = Vec::new();

        pos.legal_moves(None, 0, &mut moves);
        assert!(!moves.contains(&b1), "single-stone self-atari exceeds tolerance 0");

        pos.legal_moves(None, 3, &mut moves);
        assert!(moves.contains(&b1));
    }

    #[test]
    fn test_legal_moves_in_region() {
        let pos = Position::new();
        let e5 = parse_coord("E5");
        let only_e5 = move |pt: Point| pt == e5;
        let mut moves = Vec::new();
        pos.legal_moves(Some(&only_e5), 3, &mut moves);
        assert_eq!(moves, vec![e5]);
    }
}
