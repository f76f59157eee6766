//! Genetic Algorithm over heuristic patterns.
//!
//! Each chromosome is a [`Pattern`](crate::packing::Pattern) of packing
//! heuristics; its fitness is the fitness of the packing the pattern
//! produces. Parents are picked by tournament, recombined by single-point
//! crossover, point-mutated, and each family contributes its two fittest
//! members (parents or children) to the next generation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, limits)
//! - [`GeneticAlgorithm`]: Owns the population and executes the loop
//! - [`GaResult`]: Generation count, stagnation count and best chromosome
//! - [`Chromosome`]: A pattern with its cached fitness and bin count
//!
//! # Submodules
//!
//! - [`operators`]: Pattern crossover and mutation operators
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Burke et al. (2013), "Hyper-heuristics: a survey of the state of the art"

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{GaResult, GeneticAlgorithm};
pub use selection::Selection;
pub use types::Chromosome;
