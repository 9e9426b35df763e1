//! Constants for board geometry and default-policy parameters.
//!
//! The board uses a 1D array representation with padding for boundary detection.
//! Rows are `N + 1` cells apart: every row starts with one padding cell, which
//! also serves as the right-hand border of the previous row.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board9x9` (default): 9x9 board
//! - `board13x13`: 13x13 board
//!
//! ```sh
//! cargo build                                              # 9x9 (default)
//! cargo build --no-default-features --features board13x13  # 13x13
//! ```

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(feature = "board13x13")]
pub const N: usize = 13;

#[cfg(all(feature = "board9x9", feature = "board13x13"))]
compile_error!("Cannot enable both 'board9x9' and 'board13x13' features at the same time");

#[cfg(not(any(feature = "board9x9", feature = "board13x13")))]
compile_error!("Must enable exactly one board size feature: 'board9x9' or 'board13x13'");

/// Board width including padding on both sides.
pub const W: usize = N + 2;

/// Total board array size including all padding.
pub const BOARDSIZE: usize = (N + 1) * W + 1;

/// First valid board index (skips top and left padding).
pub const BOARD_IMIN: usize = N + 1;

/// Last valid board index (before bottom padding).
pub const BOARD_IMAX: usize = BOARDSIZE - N - 1;

/// Upper bound on the number of distinct groups on the board.
pub const MAX_GROUPS: usize = N * N;

// =============================================================================
// Special Move Values
// =============================================================================

/// Pass move marker (index 0 is padding, so safe to use).
pub const PASS_MOVE: usize = 0;

// =============================================================================
// Default Policy Parameters
// =============================================================================

/// Self-atari moves are allowed for groups with at most this many stones.
pub const DEFAULT_THRES_ALLOW_ATARI_STONE: u32 = 3;

/// Own groups in atari with at least this many stones are worth saving.
pub const DEFAULT_THRES_SAVE_ATARI: u32 = 1;

/// Opponent groups with at most this many liberties are attacked.
pub const DEFAULT_THRES_OPPONENT_LIBS: u32 = 1;

/// Opponent groups need at least this many stones to be attacked.
pub const DEFAULT_THRES_OPPONENT_STONES: u32 = 1;

/// Step bound used when a playout is asked to run until the natural end.
pub const UNBOUNDED_DEPTH: usize = 10_000_000;

/// Largest empty area the vital-point classifier will look at.
pub const NAKADE_MAX: usize = 6;

/// Default weight of a heuristic candidate.
pub const DEFAULT_GAMMA: f32 = 1.0;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Offsets to neighboring points in the 1D board array.
/// Order: North, East, South, West, NE, SE, SW, NW
pub const DELTA: [isize; 8] = [
    -(N as isize) - 1, // North (up one row)
    1,                 // East (right one column)
    (N as isize) + 1,  // South (down one row)
    -1,                // West (left one column)
    -(N as isize),     // NE (diagonal)
    W as isize,        // SE (diagonal)
    N as isize,        // SW (diagonal)
    -(W as isize),     // NW (diagonal)
];
