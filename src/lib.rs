//! Heuristic-combination search for one-dimensional bin packing.
//!
//! Rather than packing items directly, the searches in this crate look for a
//! good *pattern* of low-level packing heuristics. A pattern such as `"fbw"`
//! applies FirstFit to item 0, BestFit to item 1, WorstFit to item 2,
//! FirstFit to item 3, and so on. Interpreting a pattern is deterministic,
//! so a pattern fully describes a packing and its fitness.
//!
//! - **Packing**: items, bins, the four heuristics (FirstFit, NextFit,
//!   BestFit, WorstFit), patterns and their interpretation.
//! - **Genetic Algorithm (GA)**: tournament selection, single-point
//!   crossover, point mutation and pairwise elitist replacement over a
//!   population of patterns.
//! - **Tabu Search (TS)**: single-trajectory search that perturbs the current
//!   pattern with add/remove/change/swap moves and never re-evaluates a
//!   pattern held in tabu memory.
//! - **Datasets / Experiments**: BPP file loading and repeated, shuffled runs
//!   with single-heuristic baselines.
//!
//! Fitness is the mean over bins of `(filled / capacity)^2`: in `[0, 1]`,
//! higher is better.
//!
//! # Example
//!
//! ```
//! use u_binpack::ga::{GaConfig, GeneticAlgorithm};
//! use u_binpack::packing::Instance;
//!
//! let instance = Instance::from_sizes(10, &[2, 5, 4, 7, 1, 3, 8]).unwrap();
//! let mut ga = GeneticAlgorithm::new(instance, GaConfig::default().with_seed(1)).unwrap();
//! let result = ga.run();
//! println!(
//!     "{} generations, best pattern {} uses {} bins",
//!     result.generations,
//!     ga.best_solution().pattern(),
//!     ga.best_solution().num_bins()
//! );
//! ```
//!
//! # Features
//!
//! - `serde`: serialization for configurations, patterns and results
//! - `parallel`: rayon-parallel offspring evaluation and experiment repetitions
//! - `cli`: the `u-binpack` command-line experiment runner

pub mod dataset;
pub mod error;
pub mod experiment;
pub mod ga;
pub mod packing;
pub mod random;
pub mod tabu;

pub use error::{Error, Result};
