//! Default policy for Go playouts.
//!
//! This crate chooses the moves of the fast simulated games run inside a
//! Monte Carlo search. Each move comes from a handful of tactical heuristics
//! (capturing groups short of liberties, saving our groups in atari, killing
//! small eye spaces at their vital point) or, when none of them applies, from
//! a uniformly random legal move.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and policy defaults
//! - [`board`] - Board and region capabilities the policy relies on
//! - [`geometry`] - Neighbors and coordinates of the padded 1D board
//! - [`position`] - A concrete board (stones, groups, captures, ko)
//! - [`candidates`] - Weighted candidate moves and sampling
//! - [`nakade`] - Vital points of small eye spaces
//! - [`policy`] - Heuristics, parameters, and legality-checked sampling
//! - [`playout`] - The simulation loop
//! - [`error`] - Fatal playout errors
//!
//! ## Example
//!
//! ```
//! use default_policy::policy::DefaultPolicy;
//! use default_policy::geometry::parse_coord;
//! use default_policy::position::{Position, play_move};
//!
//! let mut pos = Position::new();
//! play_move(&mut pos, parse_coord("D4")).unwrap();
//!
//! let mut rng = fastrand::Rng::with_seed(1);
//! let result = DefaultPolicy::default()
//!     .run(&mut pos, None, 20, &mut || rng.u32(..))
//!     .unwrap();
//! assert_eq!(result.steps, 20);
//! ```

pub mod board;
pub mod candidates;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod nakade;
pub mod playout;
pub mod policy;
pub mod position;
