//! GA individuals.

use crate::packing::{Instance, Pattern, Solution};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A pattern with its evaluated fitness and bin count.
///
/// Chromosomes are only created through [`evaluated`](Chromosome::evaluated),
/// so the cached values always describe the current pattern. Changing the
/// pattern means building a new chromosome.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Chromosome {
    pattern: Pattern,
    fitness: f64,
    num_bins: usize,
}

impl Chromosome {
    /// Interprets `pattern` against `instance` and caches the result.
    pub fn evaluated(pattern: Pattern, instance: &Instance) -> Self {
        let solution = pattern.generate_solution(instance);
        Self {
            fitness: solution.fitness(),
            num_bins: solution.num_bins(),
            pattern,
        }
    }

    /// The heuristic pattern.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Solution fitness in `[0, 1]` (higher is better).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of bins the pattern produces.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Regenerates the full solution for this chromosome.
    pub fn solution(&self, instance: &Instance) -> Solution {
        self.pattern.generate_solution(instance)
    }
}
