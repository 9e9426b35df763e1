//! Point geometry of the padded 1D board.
//!
//! Every [`Point`] is an index into an array of `BOARDSIZE` cells laid out
//! row by row, each row `N + 1` cells apart with one padding cell at its
//! start. These helpers only do index arithmetic, so any board using that
//! encoding can share them.

use crate::board::Point;
use crate::constants::{DELTA, N, PASS_MOVE};

/// Get the 4 orthogonal neighbors (N, E, S, W) of a point.
#[inline]
pub fn neighbors(pt: Point) -> [Point; 4] {
    [
        (pt as isize + DELTA[0]) as usize,
        (pt as isize + DELTA[1]) as usize,
        (pt as isize + DELTA[2]) as usize,
        (pt as isize + DELTA[3]) as usize,
    ]
}

/// Get the 4 diagonal neighbors (NE, SE, SW, NW) of a point.
#[inline]
pub fn diagonal_neighbors(pt: Point) -> [Point; 4] {
    [
        (pt as isize + DELTA[4]) as usize,
        (pt as isize + DELTA[5]) as usize,
        (pt as isize + DELTA[6]) as usize,
        (pt as isize + DELTA[7]) as usize,
    ]
}

/// Column (1 at the left edge) and row (1 at the top edge) of a point.
#[inline]
pub fn coord_xy(pt: Point) -> (usize, usize) {
    (pt % (N + 1), pt / (N + 1))
}

/// Whether two points are orthogonally adjacent.
#[inline]
pub fn is_neighbor4(a: Point, b: Point) -> bool {
    let (ax, ay) = coord_xy(a);
    let (bx, by) = coord_xy(b);
    ax.abs_diff(bx) + ay.abs_diff(by) == 1
}

/// Whether two distinct points touch orthogonally or diagonally.
#[inline]
pub fn is_neighbor8(a: Point, b: Point) -> bool {
    let (ax, ay) = coord_xy(a);
    let (bx, by) = coord_xy(b);
    a != b && ax.abs_diff(bx) <= 1 && ay.abs_diff(by) <= 1
}

pub(crate) fn column_letter(col: usize) -> char {
    // Skip 'I' (Go convention to avoid confusion with 'J')
    let c = b'@' + col as u8;
    if c >= b'I' { (c + 1) as char } else { c as char }
}

/// Parse a coordinate string (e.g., "D4", "pass") into a Point.
///
/// Go coordinates use letters A-T (skipping I) for columns and 1-19 for rows.
/// Returns `PASS_MOVE` for "pass" or invalid input.
pub fn parse_coord(s: &str) -> Point {
    if s.eq_ignore_ascii_case("pass") {
        return PASS_MOVE;
    }

    let bytes = s.as_bytes();
    if bytes.len() < 2 || !bytes[0].is_ascii_alphabetic() {
        return PASS_MOVE;
    }
    if !bytes[1..].iter().all(u8::is_ascii_digit) {
        return PASS_MOVE;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if col_char == b'I' {
        return PASS_MOVE;
    }
    let mut col = (col_char - b'A' + 1) as usize;
    if col_char > b'I' {
        col -= 1;
    }

    // Too many digits fails to parse and is rejected like any other bad row.
    let Ok(row) = s[1..].parse::<usize>() else {
        return PASS_MOVE;
    };

    if !(1..=N).contains(&col) || !(1..=N).contains(&row) {
        return PASS_MOVE;
    }
    (N - row + 1) * (N + 1) + col
}

/// Convert a Point to a coordinate string (e.g., "D4").
///
/// Returns "pass" for `PASS_MOVE`.
pub fn str_coord(pt: Point) -> String {
    if pt == PASS_MOVE {
        return "pass".into();
    }
    let (col, row) = coord_xy(pt);
    format!("{}{}", column_letter(col), N + 1 - row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_coord_roundtrip() {
        for row in 1..=N {
            for col in 1..=N {
                let pt = row * (N + 1) + col;
                let s = str_coord(pt);
                assert_eq!(pt, parse_coord(&s), "Failed roundtrip for {}", s);
            }
        }
    }

    #[test]
    fn test_parse_coord_rejects_off_board() {
        assert_eq!(parse_coord("pass"), PASS_MOVE);
        assert_eq!(parse_coord("A0"), PASS_MOVE);
        assert_eq!(parse_coord("Z5"), PASS_MOVE);
        assert_eq!(parse_coord("5"), PASS_MOVE);
        assert_eq!(parse_coord("D4x"), PASS_MOVE);
    }

    #[test]
    fn test_parse_coord_skips_column_i() {
        assert_eq!(parse_coord("I5"), PASS_MOVE);
        assert_eq!(parse_coord("i5"), PASS_MOVE);
        assert_eq!(str_coord(parse_coord("H5")), "H5");
        assert_eq!(str_coord(parse_coord("J5")), "J5");
        assert_eq!(parse_coord("J5"), parse_coord("H5") + 1);
    }

    #[test]
    fn test_parse_coord_huge_row() {
        assert_eq!(parse_coord("A99999999999999999999"), PASS_MOVE);
        assert_eq!(parse_coord("A0000000000000000000001"), parse_coord("A1"));
    }

    #[test]
    fn test_neighbors() {
        let d4 = parse_coord("D4");
        let n = neighbors(d4);
        for s in ["D5", "E4", "D3", "C4"] {
            assert!(n.contains(&parse_coord(s)), "{s} should neighbor D4");
        }
        let d = diagonal_neighbors(d4);
        for s in ["E5", "E3", "C3", "C5"] {
            assert!(d.contains(&parse_coord(s)), "{s} should be diagonal to D4");
        }
    }

    #[test]
    fn test_neighbor_predicates() {
        let d4 = parse_coord("D4");
        assert!(is_neighbor4(d4, parse_coord("D5")));
        assert!(!is_neighbor4(d4, parse_coord("E5")));
        assert!(is_neighbor8(d4, parse_coord("E5")));
        assert!(!is_neighbor8(d4, parse_coord("F4")));
        assert!(!is_neighbor8(d4, d4));
    }
}
