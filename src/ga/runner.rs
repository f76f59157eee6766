//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] owns the population for one instance and runs the
//! generational loop:
//!
//! 1. select two parents by tournament
//! 2. cross them over (probability `crossover_rate`)
//! 3. mutate each child (probability `mutation_rate`)
//! 4. evaluate the children
//! 5. keep the best two of `{parent1, parent2, child1, child2}`
//!
//! until the next generation is full. The run stops when the best fitness
//! has not strictly improved for `stagnation_limit` generations or after
//! `max_generations`.

use super::config::GaConfig;
use super::operators::{point_mutation, single_point_crossover};
use super::types::Chromosome;
use crate::error::{Error, Result};
use crate::packing::{Instance, Pattern, Solution};
use crate::random::rng_from;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GaResult {
    /// Number of generations executed.
    pub generations: usize,

    /// Consecutive non-improving generations at termination.
    pub stagnation: usize,

    /// The best chromosome found during the run.
    pub best: Chromosome,

    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness before the first generation and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Genetic Algorithm over heuristic patterns.
///
/// # Examples
///
/// ```
/// use u_binpack::ga::{GaConfig, GeneticAlgorithm};
/// use u_binpack::packing::Instance;
///
/// let instance = Instance::from_sizes(10, &[2, 5, 4, 7, 1, 3, 8, 6, 4, 3]).unwrap();
/// let config = GaConfig::default().with_max_generations(20).with_seed(42);
/// let mut ga = GeneticAlgorithm::new(instance, config).unwrap();
///
/// let result = ga.run();
/// assert!(result.generations <= 20);
/// assert!(ga.best_solution().num_bins() >= 5);
/// ```
#[derive(Debug)]
pub struct GeneticAlgorithm {
    instance: Instance,
    config: GaConfig,
    rng: StdRng,
    population: Vec<Chromosome>,
    best: Chromosome,
}

/// Parents and unevaluated children of one breeding step.
struct Pairing {
    parents: (usize, usize),
    children: (Pattern, Pattern),
}

impl GeneticAlgorithm {
    /// Builds and evaluates a random initial population.
    ///
    /// Fails with [`Error::InvalidConfig`] if `config` does not validate.
    pub fn new(instance: Instance, config: GaConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut rng = rng_from(config.seed);
        let patterns: Vec<Pattern> = (0..config.population_size)
            .map(|_| Pattern::random(&mut rng, config.max_pattern_length))
            .collect();
        let population = evaluate_all(&instance, patterns, config.parallel);
        let best = find_best(&population).clone();

        Ok(Self {
            instance,
            config,
            rng,
            population,
            best,
        })
    }

    /// The instance being packed.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The configuration in use.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The current population.
    pub fn population(&self) -> &[Chromosome] {
        &self.population
    }

    /// Best chromosome seen so far (pattern, fitness, bin count).
    pub fn best_solution(&self) -> &Chromosome {
        &self.best
    }

    /// Regenerates the bins of the best chromosome.
    pub fn best_bins(&self) -> Solution {
        self.best.solution(&self.instance)
    }

    /// Runs the GA until a stopping condition is met.
    pub fn run(&mut self) -> GaResult {
        self.run_with_cancel(None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best found so far.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> GaResult {
        let mut generations = 0usize;
        let mut stagnation = 0usize;
        let mut cancelled = false;
        let mut fitness_history = Vec::with_capacity(self.config.max_generations + 1);
        fitness_history.push(self.best.fitness());

        while generations < self.config.max_generations && !self.stagnated(stagnation) {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            self.population = self.next_generation();
            generations += 1;

            let gen_best = find_best(&self.population);
            if gen_best.fitness() > self.best.fitness() {
                self.best = gen_best.clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }
            fitness_history.push(self.best.fitness());

            debug!(
                "ga generation {generations}: best fitness {:.6} ({} bins, pattern {}), stagnation {stagnation}",
                self.best.fitness(),
                self.best.num_bins(),
                self.best.pattern()
            );
        }

        let stagnated = self.stagnated(stagnation);
        info!(
            "ga finished after {generations} generations (stagnated: {stagnated}, cancelled: {cancelled}): \
             best fitness {:.6}, {} bins, pattern {}",
            self.best.fitness(),
            self.best.num_bins(),
            self.best.pattern()
        );

        GaResult {
            generations,
            stagnation,
            best: self.best.clone(),
            stagnated,
            cancelled,
            fitness_history,
        }
    }

    fn stagnated(&self, stagnation: usize) -> bool {
        self.config.stagnation_limit > 0 && stagnation >= self.config.stagnation_limit
    }

    /// Breeds a full replacement population.
    ///
    /// Every random draw happens here, sequentially; only the child
    /// evaluations may run in parallel.
    fn next_generation(&mut self) -> Vec<Chromosome> {
        let size = self.config.population_size;
        let pairings: Vec<Pairing> = (0..size.div_ceil(2)).map(|_| self.breed()).collect();

        let mut patterns = Vec::with_capacity(pairings.len() * 2);
        let mut parents = Vec::with_capacity(pairings.len());
        for pairing in pairings {
            parents.push(pairing.parents);
            patterns.push(pairing.children.0);
            patterns.push(pairing.children.1);
        }
        let children = evaluate_all(&self.instance, patterns, self.config.parallel);

        let mut next = Vec::with_capacity(size + 1);
        for (pair, (p1, p2)) in children.chunks_exact(2).zip(parents) {
            let candidates = [
                &self.population[p1],
                &self.population[p2],
                &pair[0],
                &pair[1],
            ];
            let (first, second) = top_two(candidates);
            next.push(first.clone());
            next.push(second.clone());
        }
        next.truncate(size);
        next
    }

    fn breed(&mut self) -> Pairing {
        let p1 = self.config.selection.select(&self.population, &mut self.rng);
        let p2 = self.config.selection.select(&self.population, &mut self.rng);
        let parent1 = self.population[p1].pattern();
        let parent2 = self.population[p2].pattern();

        let (mut c1, mut c2) = if self.rng.random_bool(self.config.crossover_rate) {
            single_point_crossover(
                parent1,
                parent2,
                self.config.max_pattern_length,
                &mut self.rng,
            )
        } else {
            (parent1.clone(), parent2.clone())
        };

        for child in [&mut c1, &mut c2] {
            if self.rng.random_bool(self.config.mutation_rate) {
                point_mutation(child, &mut self.rng);
            }
        }

        Pairing {
            parents: (p1, p2),
            children: (c1, c2),
        }
    }
}

/// Evaluates patterns into chromosomes, preserving order.
fn evaluate_all(instance: &Instance, patterns: Vec<Pattern>, parallel: bool) -> Vec<Chromosome> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return patterns
                .into_par_iter()
                .map(|p| Chromosome::evaluated(p, instance))
                .collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    patterns
        .into_iter()
        .map(|p| Chromosome::evaluated(p, instance))
        .collect()
}

/// Find the chromosome with the highest fitness (first one on ties).
fn find_best(population: &[Chromosome]) -> &Chromosome {
    let mut best = &population[0];
    for c in &population[1..] {
        if c.fitness() > best.fitness() {
            best = c;
        }
    }
    best
}

/// The two fittest of four candidates, ties kept in encounter order.
fn top_two(candidates: [&Chromosome; 4]) -> (&Chromosome, &Chromosome) {
    let mut order = [0usize, 1, 2, 3];
    // Stable sort, descending by fitness.
    order.sort_by(|&a, &b| {
        candidates[b]
            .fitness()
            .partial_cmp(&candidates[a].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    (candidates[order[0]], candidates[order[1]])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Selection;
    use crate::packing::Heuristic;

    fn instance() -> Instance {
        Instance::from_sizes(
            100,
            &[
                42, 69, 67, 57, 93, 90, 38, 36, 45, 42, 33, 79, 27, 57, 44, 84, 86, 92, 46, 38,
                85, 33, 82, 73, 49, 70, 59, 23, 57, 72, 74, 69, 33, 42, 28, 46, 30, 64, 29, 74,
                41, 49, 55, 98, 80, 32, 25, 38, 82, 30,
            ],
        )
        .unwrap()
    }

    fn config() -> GaConfig {
        GaConfig::default().with_seed(42).with_parallel(false)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = GeneticAlgorithm::new(instance(), config().with_population_size(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_initial_population_is_evaluated() {
        let ga = GeneticAlgorithm::new(instance(), config()).unwrap();
        assert_eq!(ga.population().len(), 50);
        for c in ga.population() {
            assert!((1..=10).contains(&c.pattern().len()));
            let solution = c.solution(ga.instance());
            assert_eq!(c.fitness(), solution.fitness());
            assert_eq!(c.num_bins(), solution.num_bins());
        }
        let max = ga
            .population()
            .iter()
            .map(Chromosome::fitness)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(ga.best_solution().fitness(), max);
    }

    #[test]
    fn test_best_fitness_non_decreasing() {
        let mut ga = GeneticAlgorithm::new(instance(), config()).unwrap();
        let result = ga.run();

        assert_eq!(result.fitness_history.len(), result.generations + 1);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness should never decrease: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_population_best_never_regresses() {
        // The pairwise replacement keeps the fittest of each family, so the
        // population maximum should not drop between generations in practice.
        let mut ga = GeneticAlgorithm::new(instance(), config()).unwrap();
        let mut prev = find_best(ga.population()).fitness();
        for _ in 0..30 {
            ga.population = ga.next_generation();
            let current = find_best(ga.population()).fitness();
            assert!(current >= prev, "{current} < {prev}");
            prev = current;
        }
    }

    #[test]
    fn test_termination_bounds() {
        let mut ga = GeneticAlgorithm::new(instance(), config()).unwrap();
        let result = ga.run();
        assert!(result.generations <= 250);
        assert!(result.generations >= 50, "needs 50 stagnant generations to stop early");
        if result.generations < 250 {
            assert!(result.stagnated);
            assert_eq!(result.stagnation, 50);
        }
        assert!(!result.cancelled);
    }

    #[test]
    fn test_stagnation_limit_disabled_runs_all_generations() {
        let cfg = config().with_stagnation_limit(0).with_max_generations(15);
        let mut ga = GeneticAlgorithm::new(instance(), cfg).unwrap();
        let result = ga.run();
        assert_eq!(result.generations, 15);
        assert!(!result.stagnated);
    }

    #[test]
    fn test_population_size_preserved_for_odd_sizes() {
        let cfg = config().with_population_size(7).with_max_generations(5);
        let mut ga = GeneticAlgorithm::new(instance(), cfg).unwrap();
        ga.run();
        assert_eq!(ga.population().len(), 7);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = GeneticAlgorithm::new(instance(), config()).unwrap();
        let mut b = GeneticAlgorithm::new(instance(), config()).unwrap();
        let ra = a.run();
        let rb = b.run();
        assert_eq!(ra.generations, rb.generations);
        assert_eq!(ra.best.pattern(), rb.best.pattern());
        assert_eq!(ra.fitness_history, rb.fitness_history);
    }

    #[test]
    fn test_beats_or_matches_next_fit() {
        let inst = instance();
        let next_fit = Pattern::single(Heuristic::NextFit)
            .generate_solution(&inst)
            .fitness();
        let mut ga = GeneticAlgorithm::new(inst, config()).unwrap();
        let result = ga.run();
        assert!(result.best.fitness() >= next_fit);
        assert_eq!(ga.best_bins().fitness(), result.best.fitness());
    }

    #[test]
    fn test_best_bins_place_every_item() {
        let mut ga = GeneticAlgorithm::new(instance(), config().with_max_generations(10)).unwrap();
        ga.run();
        let bins = ga.best_bins();
        assert_eq!(bins.total_items(), ga.instance().len());
        assert_eq!(bins.num_bins(), ga.best_solution().num_bins());
        assert!(bins.num_bins() >= ga.instance().lower_bound());
    }

    #[test]
    fn test_all_selection_strategies() {
        for selection in [Selection::Tournament(3), Selection::Roulette, Selection::Rank] {
            let cfg = config().with_selection(selection).with_max_generations(20);
            let mut ga = GeneticAlgorithm::new(instance(), cfg).unwrap();
            let result = ga.run();
            assert!(
                result.best.fitness() > 0.0 && result.best.fitness() <= 1.0,
                "selection {selection:?} gave fitness {}",
                result.best.fitness()
            );
        }
    }

    #[test]
    fn test_cancellation_before_start() {
        let mut ga = GeneticAlgorithm::new(instance(), config()).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));
        let result = ga.run_with_cancel(Some(cancel));
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_top_two_ties_keep_encounter_order() {
        let inst = Instance::from_sizes(10, &[5, 5]).unwrap();
        let a = Chromosome::evaluated("f".parse().unwrap(), &inst);
        let b = Chromosome::evaluated("n".parse().unwrap(), &inst);
        let c = Chromosome::evaluated("b".parse().unwrap(), &inst);
        let d = Chromosome::evaluated("w".parse().unwrap(), &inst);
        // All four pack [5,5] into one bin: equal fitness.
        let (first, second) = top_two([&a, &b, &c, &d]);
        assert_eq!(first.pattern(), a.pattern());
        assert_eq!(second.pattern(), b.pattern());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let mut seq = GeneticAlgorithm::new(instance(), config()).unwrap();
        let mut par = GeneticAlgorithm::new(instance(), config().with_parallel(true)).unwrap();
        let rs = seq.run();
        let rp = par.run();
        assert_eq!(rs.best.pattern(), rp.best.pattern());
        assert_eq!(rs.fitness_history, rp.fitness_history);
    }
}
