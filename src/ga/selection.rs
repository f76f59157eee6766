//! Parent selection strategies.
//!
//! All strategies **maximize**: a chromosome's fitness is the mean squared
//! bin fullness, and higher is better.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Chromosome;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_binpack::ga::Selection;
///
/// // The default: a size-20 tournament, sampled with replacement.
/// assert_eq!(Selection::default(), Selection::Tournament(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    /// Draw `k` chromosomes uniformly with replacement and keep the fittest.
    ///
    /// Ties keep the earliest draw.
    Tournament(usize),

    /// Fitness-proportionate selection.
    ///
    /// Fitness values are already non-negative, so they are used directly
    /// as weights (plus a small epsilon so all-zero populations still work).
    Roulette,

    /// Linear ranking: the fittest of `n` gets weight `n`, the least fit 1.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(20)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

fn roulette<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let epsilon = 1e-10;
    let weights: Vec<f64> = population
        .iter()
        .map(|c| c.fitness().max(0.0) + epsilon)
        .collect();
    let total: f64 = weights.iter().sum();

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

fn rank<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    // Fittest first.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        population[b]
            .fitness()
            .partial_cmp(&population[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1] // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packing::Instance;
    use crate::random::create_rng;

    // Four chromosomes with clearly ordered fitness: the single-symbol
    // patterns on an instance where the heuristics disagree.
    fn population() -> Vec<Chromosome> {
        let instance = Instance::from_sizes(10, &[6, 5, 4, 6, 3, 7, 2, 5]).unwrap();
        ["n", "f", "w", "b"]
            .iter()
            .map(|p| Chromosome::evaluated(p.parse().unwrap(), &instance))
            .collect()
    }

    fn fittest(pop: &[Chromosome]) -> usize {
        (0..pop.len())
            .max_by(|&a, &b| pop[a].fitness().partial_cmp(&pop[b].fitness()).unwrap())
            .unwrap()
    }

    fn counts(sel: Selection, pop: &[Chromosome], n: usize) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..n {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_fittest() {
        let pop = population();
        let best = fittest(&pop);
        let counts = counts(Selection::Tournament(4), &pop, 10_000);
        // The best is chosen whenever it appears in the 4 draws: ~68%.
        assert!(
            counts[best] > 5000,
            "expected fittest to dominate, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = population();
        let counts = counts(Selection::Tournament(1), &pop, 10_000);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_ties_are_uniform() {
        let instance = Instance::from_sizes(10, &[5, 5]).unwrap();
        let pop: Vec<Chromosome> = (0..4)
            .map(|_| Chromosome::evaluated("f".parse().unwrap(), &instance))
            .collect();
        let counts = counts(Selection::Tournament(2), &pop, 10_000);
        for &c in &counts {
            assert!(c > 1500, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_and_rank_prefer_fitter() {
        let pop = population();
        let best = fittest(&pop);
        let worst = (0..pop.len())
            .min_by(|&a, &b| pop[a].fitness().partial_cmp(&pop[b].fitness()).unwrap())
            .unwrap();
        if pop[best].fitness() == pop[worst].fitness() {
            return;
        }
        for sel in [Selection::Roulette, Selection::Rank] {
            let counts = counts(sel, &pop, 20_000);
            assert!(
                counts[best] > counts[worst],
                "{sel:?} should prefer the fitter chromosome: {counts:?}"
            );
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = vec![population().remove(0)];
        let mut rng = create_rng(42);
        assert_eq!(Selection::Tournament(20).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Roulette.select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let mut rng = create_rng(42);
        Selection::default().select(&[], &mut rng);
    }
}
