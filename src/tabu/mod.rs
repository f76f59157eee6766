//! Tabu Search (TS) over heuristic patterns.
//!
//! A single-trajectory local search: each iteration perturbs the current
//! pattern with a random [`MoveOperator`], skips candidates already held in
//! the [`TabuMemory`], and adopts a candidate only if its packing is
//! strictly fitter.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search - Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod moves;
mod runner;

pub use config::TabuConfig;
pub use memory::TabuMemory;
pub use moves::MoveOperator;
pub use runner::{TabuResult, TabuSearch};
