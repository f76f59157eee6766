//! Complete packings and their fitness.

use super::bin::Bin;

#[cfg(feature = "serde")]
use serde::Serialize;

/// An ordered list of bins covering every item of an instance.
///
/// The fitness is computed once at construction and always equals
/// [`mean_fitness`] of the contained bins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Solution {
    bins: Vec<Bin>,
    fitness: f64,
}

impl Solution {
    /// Wraps a bin list and computes its fitness.
    pub fn from_bins(bins: Vec<Bin>) -> Self {
        let fitness = mean_fitness(&bins);
        Self { bins, fitness }
    }

    /// The bins, in the order they were opened.
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Number of bins used.
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Mean of the per-bin fitness values, in `[0, 1]`.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Recomputes the fitness from the bins.
    pub fn recompute_fitness(&self) -> f64 {
        mean_fitness(&self.bins)
    }

    /// Total number of items placed.
    pub fn total_items(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// Mean bin fullness as a percentage of capacity.
    pub fn avg_fullness(&self) -> f64 {
        if self.bins.is_empty() {
            return 0.0;
        }
        let ratio_sum: f64 = self
            .bins
            .iter()
            .map(|b| b.filled_space() as f64 / b.capacity() as f64)
            .sum();
        ratio_sum / self.bins.len() as f64 * 100.0
    }
}

/// Mean of `(filled / capacity)^2` over `bins`; 0 for an empty list.
///
/// The mean rather than the sum keeps solutions with different bin counts
/// comparable on the same `[0, 1]` scale.
pub fn mean_fitness(bins: &[Bin]) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }
    bins.iter().map(Bin::fitness).sum::<f64>() / bins.len() as f64
}
