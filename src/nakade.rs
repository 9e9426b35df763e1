//! Vital points of small enclosed eye spaces (nakade).
//!
//! An empty area of at most six points surrounded by the defender can only
//! make two eyes if the defender gets to split it. For the classic killable
//! shapes there is a single point that prevents this; playing it kills the
//! group. Shapes are told apart by how many area neighbors each point has.

use crate::board::{Board, Cell, Point};
use crate::constants::{NAKADE_MAX, PASS_MOVE};
use crate::geometry::{is_neighbor4, neighbors};

/// Find the vital point of the empty area containing `seed`.
///
/// The player to move is the attacker. Returns `None` when the area touches
/// an attacker stone, holds more than six points, or has no single vital
/// point.
pub fn nakade_point<B: Board>(board: &B, seed: Point) -> Option<Point> {
    let attacker = Cell::Stone(board.to_play());

    let mut area = [PASS_MOVE; NAKADE_MAX];
    area[0] = seed;
    let mut area_n = 1;

    let mut i = 0;
    while i < area_n {
        for c in neighbors(area[i]) {
            let cell = board.cell(c);
            if cell == attacker {
                return None;
            }
            if cell != Cell::Empty || area[..area_n].contains(&c) {
                continue;
            }
            if area_n >= NAKADE_MAX {
                return None;
            }
            area[area_n] = c;
            area_n += 1;
        }
        i += 1;
    }

    // neighbor count of each area point, and how many points have each count
    let mut nei = [0usize; NAKADE_MAX];
    let mut ptbynei = [0usize; 9];
    for i in 0..area_n {
        for j in i + 1..area_n {
            if is_neighbor4(area[i], area[j]) {
                nei[i] += 1;
                nei[j] += 1;
            }
        }
    }
    for &k in &nei[..area_n] {
        ptbynei[k] += 1;
    }

    // any one point having a given neighbor count
    let by_count = |k: usize| (0..area_n).find(|&i| nei[i] == k).map(|i| area[i]);

    match area_n {
        3 => by_count(2),
        4 if ptbynei[3] == 1 => by_count(3),
        5 if ptbynei[3] == 1 && ptbynei[1] == 1 => by_count(3),
        5 if ptbynei[4] == 1 => by_count(4),
        6 if ptbynei[4] == 1 && ptbynei[2] == 3 => by_count(4),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{parse_coord, str_coord};
    use crate::position::Position;

    /// Black (to move) attacks the empty area walled in by White.
    fn vital(white: &[&str], seed: &str) -> Option<String> {
        let pos = Position::setup(&[], white).unwrap();
        nakade_point(&pos, parse_coord(seed)).map(str_coord)
    }

    #[test]
    fn test_two_points_have_no_vital_point() {
        assert_eq!(vital(&["A2", "B2", "C1"], "A1"), None);
    }

    #[test]
    fn test_single_point() {
        assert_eq!(vital(&["A2", "B1"], "A1"), None);
    }

    #[test]
    fn test_bent_three() {
        // A1 B1 A2, bent around the corner
        assert_eq!(vital(&["A3", "B2", "C1"], "A2"), Some("A1".into()));
    }

    #[test]
    fn test_tetris_four() {
        // A1 B1 C1 + B2
        assert_eq!(vital(&["A2", "C2", "B3", "D1"], "A1"), Some("B1".into()));
    }

    #[test]
    fn test_square_four_has_no_vital_point() {
        assert_eq!(vital(&["A3", "B3", "C2", "C1"], "A1"), None);
    }

    #[test]
    fn test_cross_five() {
        let walls = ["D4", "D6", "F4", "F6", "C5", "G5", "E3", "E7"];
        assert_eq!(vital(&walls, "D5"), Some("E5".into()));
    }

    #[test]
    fn test_edge_stops_fill() {
        // Off-board points bound the area like defender stones do.
        assert_eq!(vital(&["A2", "B2", "C2", "D1"], "C1"), Some("B1".into()));
    }
}
