//! Bin-packing model and pattern interpretation.
//!
//! # Key Types
//!
//! - [`Item`], [`Bin`]: sized items and capacity-bounded containers
//! - [`Heuristic`]: FirstFit / NextFit / WorstFit / BestFit placement rules
//! - [`Pattern`]: non-empty heuristic sequence, the unit of search
//! - [`Solution`]: bins produced by interpreting a pattern
//! - [`Instance`]: validated capacity + item sequence

mod bin;
mod heuristic;
mod instance;
mod pattern;
mod solution;

pub use bin::{Bin, Item};
pub use heuristic::Heuristic;
pub use instance::Instance;
pub use pattern::{generate_solution, Pattern, MAX_PATTERN_LENGTH};
pub use solution::{mean_fitness, Solution};
