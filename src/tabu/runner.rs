//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Generate a random initial pattern, evaluate it and mark it tabu
//! 2. At each iteration:
//!    a. Apply one uniformly chosen move operator to the current pattern
//!    b. Skip the candidate if it is tabu
//!    c. Otherwise mark it tabu and evaluate it; adopt it if it strictly
//!       improves on the best fitness
//!    d. Count the iteration towards stagnation (after any reset)
//! 3. Terminate after max iterations or stagnation
//!
//! The current pattern is always the best one found: non-improving
//! candidates are evaluated but never adopted.
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search - Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search - Part II", *ORSA Journal on Computing* 2(1), 4-32.

use super::config::TabuConfig;
use super::memory::TabuMemory;
use crate::error::{Error, Result};
use crate::packing::{Bin, Heuristic, Instance, Pattern, Solution};
use crate::random::rng_from;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TabuResult {
    /// Total iterations executed.
    pub iterations: usize,
    /// Consecutive non-improving iterations at termination.
    pub stagnation: usize,
    /// Best pattern found.
    pub best_pattern: Pattern,
    /// Fitness of the best pattern's solution.
    pub best_fitness: f64,
    /// Bin count of the best pattern's solution.
    pub num_bins: usize,
    /// Patterns evaluated, including the initial one.
    pub evaluations: usize,
    /// Iterations whose candidate was tabu and skipped.
    pub tabu_hits: usize,
    /// Iteration at which the best pattern was adopted (0 = initial).
    pub best_iteration: usize,
    /// Whether the run stopped on the stagnation limit.
    pub stagnated: bool,
    /// Whether the run was cancelled externally.
    pub cancelled: bool,
    /// Best fitness before the first iteration and after each iteration.
    pub fitness_history: Vec<f64>,
}

/// Tabu Search over heuristic patterns.
///
/// # Examples
///
/// ```
/// use u_binpack::packing::Instance;
/// use u_binpack::tabu::{TabuConfig, TabuSearch};
///
/// let instance = Instance::from_sizes(10, &[6, 5, 4, 6, 3, 7, 2, 5]).unwrap();
/// let config = TabuConfig::default().with_max_iterations(200).with_seed(42);
/// let mut ts = TabuSearch::new(instance, config).unwrap();
///
/// let result = ts.run();
/// assert!(result.iterations <= 200);
/// assert_eq!(ts.fitness(), result.best_fitness);
/// assert_eq!(ts.bins().len(), result.num_bins);
/// ```
#[derive(Debug)]
pub struct TabuSearch {
    instance: Instance,
    config: TabuConfig,
    rng: StdRng,
    pattern: Pattern,
    solution: Solution,
    tabu: TabuMemory,
    evaluations: usize,
}

impl TabuSearch {
    /// Evaluates a random initial pattern and marks it tabu.
    ///
    /// Fails with [`Error::InvalidConfig`] if `config` does not validate.
    pub fn new(instance: Instance, config: TabuConfig) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;

        let mut rng = rng_from(config.seed);
        let pattern = Pattern::random(&mut rng, config.max_pattern_length);
        Ok(Self::starting_from(instance, config, rng, pattern))
    }

    /// Starts the search from a given pattern instead of a random one.
    pub fn with_initial_pattern(
        instance: Instance,
        config: TabuConfig,
        pattern: Pattern,
    ) -> Result<Self> {
        config.validate().map_err(Error::InvalidConfig)?;
        if pattern.len() > config.max_pattern_length {
            return Err(Error::PatternTooLong {
                len: pattern.len(),
                max: config.max_pattern_length,
            });
        }

        let rng = rng_from(config.seed);
        Ok(Self::starting_from(instance, config, rng, pattern))
    }

    fn starting_from(instance: Instance, config: TabuConfig, rng: StdRng, pattern: Pattern) -> Self {
        let solution = pattern.generate_solution(&instance);
        let mut tabu = TabuMemory::new(config.tabu_tenure);
        tabu.insert(pattern.clone());

        Self {
            instance,
            config,
            rng,
            pattern,
            solution,
            tabu,
            evaluations: 1,
        }
    }

    /// The instance being packed.
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// The configuration in use.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Current (and best) pattern.
    pub fn best_pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Bins of the best solution.
    pub fn bins(&self) -> &[Bin] {
        self.solution.bins()
    }

    /// The best solution.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Fitness of the best solution.
    pub fn fitness(&self) -> f64 {
        self.solution.fitness()
    }

    /// The tabu memory.
    pub fn tabu(&self) -> &TabuMemory {
        &self.tabu
    }

    /// Runs the search until a stopping condition is met.
    pub fn run(&mut self) -> TabuResult {
        self.run_with_cancel(None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The flag is checked once per iteration.
    pub fn run_with_cancel(&mut self, cancel: Option<Arc<AtomicBool>>) -> TabuResult {
        let mut iterations = 0usize;
        let mut stagnation = 0usize;
        let mut tabu_hits = 0usize;
        let mut best_iteration = 0usize;
        let mut cancelled = false;
        let mut fitness_history = Vec::with_capacity(self.config.max_iterations + 1);
        fitness_history.push(self.fitness());

        while iterations < self.config.max_iterations && !self.stagnated(stagnation) {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            iterations += 1;
            let op = self.config.operators[self.rng.random_range(0..self.config.operators.len())];
            let candidate = op.apply(
                &self.pattern,
                &Heuristic::ALL,
                self.config.max_pattern_length,
                &mut self.rng,
            );

            if self.tabu.contains(&candidate) {
                trace!("tabu iteration {iterations}: {op} produced tabu pattern {candidate}");
                tabu_hits += 1;
            } else {
                self.tabu.insert(candidate.clone());
                let solution = candidate.generate_solution(&self.instance);
                self.evaluations += 1;

                if solution.fitness() > self.fitness() {
                    debug!(
                        "tabu iteration {iterations}: {op} improved fitness {:.6} -> {:.6} ({} bins, pattern {candidate})",
                        self.fitness(),
                        solution.fitness(),
                        solution.num_bins()
                    );
                    self.pattern = candidate;
                    self.solution = solution;
                    best_iteration = iterations;
                    stagnation = 0;
                }
            }

            // Counted on every iteration, including the one that improved.
            stagnation += 1;
            fitness_history.push(self.fitness());
        }

        let stagnated = self.stagnated(stagnation);
        info!(
            "tabu search finished after {iterations} iterations (stagnated: {stagnated}, cancelled: {cancelled}): \
             best fitness {:.6}, {} bins, pattern {}, {} evaluations, {tabu_hits} tabu hits",
            self.fitness(),
            self.solution.num_bins(),
            self.pattern,
            self.evaluations
        );

        TabuResult {
            iterations,
            stagnation,
            best_pattern: self.pattern.clone(),
            best_fitness: self.fitness(),
            num_bins: self.solution.num_bins(),
            evaluations: self.evaluations,
            tabu_hits,
            best_iteration,
            stagnated,
            cancelled,
            fitness_history,
        }
    }

    fn stagnated(&self, stagnation: usize) -> bool {
        self.config.max_no_improve > 0 && stagnation >= self.config.max_no_improve
    }
}
