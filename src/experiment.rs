//! Repeated experiment runs over one instance.
//!
//! Each repetition shuffles the item order with its own seed, then runs the
//! selected metaheuristics and, optionally, every single-heuristic baseline
//! on the shuffled order. Repetitions share nothing but the read-only
//! instance, so with the `parallel` feature they run on rayon's pool.

use crate::error::{Error, Result};
use crate::ga::{GaConfig, GeneticAlgorithm};
use crate::packing::{Heuristic, Instance, Pattern};
use crate::random::create_rng;
use crate::tabu::{TabuConfig, TabuSearch};
use log::info;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A metaheuristic driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// [`GeneticAlgorithm`].
    Ga,
    /// [`TabuSearch`].
    Tabu,
}

/// What to run for each repetition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ExperimentPlan {
    /// Number of independent repetitions.
    pub repetitions: usize,
    /// Base seed; repetition `r` uses `seed + r`.
    pub seed: u64,
    /// Metaheuristics to run.
    pub algorithms: Vec<Algorithm>,
    /// Whether to pack with each single heuristic as well.
    pub baselines: bool,
    /// GA parameters (the seed is overridden per repetition).
    pub ga: GaConfig,
    /// TS parameters (the seed is overridden per repetition).
    pub tabu: TabuConfig,
    /// Run repetitions in parallel (needs the `parallel` feature).
    pub parallel: bool,
}

impl Default for ExperimentPlan {
    fn default() -> Self {
        Self {
            repetitions: 30,
            seed: 0,
            algorithms: vec![Algorithm::Ga, Algorithm::Tabu],
            baselines: true,
            ga: GaConfig::default(),
            tabu: TabuConfig::default(),
            parallel: true,
        }
    }
}

impl ExperimentPlan {
    /// Sets the number of repetitions.
    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the metaheuristics to run.
    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    /// Enables or disables the single-heuristic baselines.
    pub fn with_baselines(mut self, baselines: bool) -> Self {
        self.baselines = baselines;
        self
    }

    /// Sets the GA parameters.
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    /// Sets the TS parameters.
    pub fn with_tabu(mut self, tabu: TabuConfig) -> Self {
        self.tabu = tabu;
        self
    }

    /// Enables or disables parallel repetitions.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the plan and the nested algorithm configurations.
    pub fn validate(&self) -> Result<()> {
        if self.repetitions == 0 {
            return Err(Error::InvalidConfig("repetitions must be at least 1".into()));
        }
        if self.algorithms.contains(&Algorithm::Ga) {
            self.ga.validate().map_err(Error::InvalidConfig)?;
        }
        if self.algorithms.contains(&Algorithm::Tabu) {
            self.tabu.validate().map_err(Error::InvalidConfig)?;
        }
        Ok(())
    }
}

/// Outcome of one metaheuristic run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunSummary {
    /// Which driver produced this run.
    pub algorithm: Algorithm,
    /// Repetition index.
    pub repetition: usize,
    /// Wall-clock time of `run()` in milliseconds.
    pub elapsed_ms: f64,
    /// Bins in the best solution.
    pub num_bins: usize,
    /// Best solution fitness.
    pub fitness: f64,
    /// Generations (GA) or iterations (TS) executed.
    pub iterations: usize,
    /// Stagnation count at termination.
    pub stagnation: usize,
    /// Best heuristic pattern.
    pub pattern: Pattern,
}

/// Outcome of packing with one heuristic only.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BaselineSummary {
    /// The heuristic used for every item.
    pub heuristic: Heuristic,
    /// Repetition index.
    pub repetition: usize,
    /// Wall-clock packing time in milliseconds.
    pub elapsed_ms: f64,
    /// Bins used.
    pub num_bins: usize,
    /// Mean bin fullness in percent.
    pub avg_fullness: f64,
}

/// All runs for one instance.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ExperimentReport {
    /// Dataset name.
    pub name: String,
    /// Bin capacity.
    pub capacity: u64,
    /// Number of items.
    pub num_items: usize,
    /// `ceil(total size / capacity)`.
    pub lower_bound: usize,
    /// Metaheuristic runs, ordered by repetition then algorithm.
    pub runs: Vec<RunSummary>,
    /// Baseline runs, ordered by repetition then heuristic.
    pub baselines: Vec<BaselineSummary>,
}

impl ExperimentReport {
    /// Fewest bins reached by `algorithm` over all repetitions.
    pub fn best_bins(&self, algorithm: Algorithm) -> Option<usize> {
        self.runs
            .iter()
            .filter(|r| r.algorithm == algorithm)
            .map(|r| r.num_bins)
            .min()
    }
}

/// Packs `instance` in its current order using `heuristic` alone.
pub fn baseline(instance: &Instance, heuristic: Heuristic, repetition: usize) -> BaselineSummary {
    let start = Instant::now();
    let solution = Pattern::single(heuristic).generate_solution(instance);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    BaselineSummary {
        heuristic,
        repetition,
        elapsed_ms,
        num_bins: solution.num_bins(),
        avg_fullness: solution.avg_fullness(),
    }
}

/// Runs every repetition of `plan` on `instance`.
///
/// # Examples
///
/// ```
/// use u_binpack::experiment::{run_repetitions, Algorithm, ExperimentPlan};
/// use u_binpack::ga::GaConfig;
/// use u_binpack::packing::Instance;
///
/// let instance = Instance::from_sizes(10, &[2, 5, 4, 7, 1, 3, 8]).unwrap();
/// let plan = ExperimentPlan::default()
///     .with_repetitions(2)
///     .with_algorithms(vec![Algorithm::Ga])
///     .with_ga(GaConfig::default().with_max_generations(5));
///
/// let report = run_repetitions("tiny", &instance, &plan).unwrap();
/// assert_eq!(report.runs.len(), 2);
/// assert_eq!(report.baselines.len(), 8);
/// ```
pub fn run_repetitions(name: &str, instance: &Instance, plan: &ExperimentPlan) -> Result<ExperimentReport> {
    plan.validate()?;
    info!(
        "experiment {name}: {} items, capacity {}, {} repetitions",
        instance.len(),
        instance.capacity(),
        plan.repetitions
    );

    let outcomes = run_all(instance, plan)?;

    let mut runs = Vec::new();
    let mut baselines = Vec::new();
    for (rep_runs, rep_baselines) in outcomes {
        runs.extend(rep_runs);
        baselines.extend(rep_baselines);
    }

    Ok(ExperimentReport {
        name: name.to_string(),
        capacity: instance.capacity(),
        num_items: instance.len(),
        lower_bound: instance.lower_bound(),
        runs,
        baselines,
    })
}

type RepetitionOutcome = (Vec<RunSummary>, Vec<BaselineSummary>);

fn run_all(instance: &Instance, plan: &ExperimentPlan) -> Result<Vec<RepetitionOutcome>> {
    #[cfg(feature = "parallel")]
    {
        if plan.parallel {
            return (0..plan.repetitions)
                .into_par_iter()
                .map(|r| run_repetition(instance, plan, r))
                .collect();
        }
    }

    (0..plan.repetitions)
        .map(|r| run_repetition(instance, plan, r))
        .collect()
}

fn run_repetition(instance: &Instance, plan: &ExperimentPlan, repetition: usize) -> Result<RepetitionOutcome> {
    let seed = plan.seed.wrapping_add(repetition as u64);
    let mut rng = create_rng(seed);
    let shuffled = instance.shuffled(&mut rng);

    let mut runs = Vec::with_capacity(plan.algorithms.len());
    for &algorithm in &plan.algorithms {
        let summary = match algorithm {
            Algorithm::Ga => {
                let config = plan.ga.clone().with_seed(seed);
                let mut ga = GeneticAlgorithm::new(shuffled.clone(), config)?;
                let start = Instant::now();
                let result = ga.run();
                RunSummary {
                    algorithm,
                    repetition,
                    elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
                    num_bins: result.best.num_bins(),
                    fitness: result.best.fitness(),
                    iterations: result.generations,
                    stagnation: result.stagnation,
                    pattern: result.best.pattern().clone(),
                }
            }
            Algorithm::Tabu => {
                let config = plan.tabu.clone().with_seed(seed);
                let mut ts = TabuSearch::new(shuffled.clone(), config)?;
                let start = Instant::now();
                let result = ts.run();
                RunSummary {
                    algorithm,
                    repetition,
                    elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
                    num_bins: result.num_bins,
                    fitness: result.best_fitness,
                    iterations: result.iterations,
                    stagnation: result.stagnation,
                    pattern: result.best_pattern,
                }
            }
        };
        info!(
            "repetition {repetition} {:?}: {} bins, fitness {:.6}, pattern {}",
            summary.algorithm, summary.num_bins, summary.fitness, summary.pattern
        );
        runs.push(summary);
    }

    let baselines = if plan.baselines {
        Heuristic::ALL
            .iter()
            .map(|&h| baseline(&shuffled, h, repetition))
            .collect()
    } else {
        Vec::new()
    };

    Ok((runs, baselines))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> Instance {
        Instance::from_sizes(
            50,
            &[12, 31, 7, 25, 18, 44, 9, 27, 33, 15, 21, 6, 38, 19, 24, 11, 29, 40, 8, 16],
        )
        .unwrap()
    }

    fn small_plan() -> ExperimentPlan {
        ExperimentPlan::default()
            .with_repetitions(3)
            .with_seed(100)
            .with_ga(GaConfig::default().with_max_generations(10).with_parallel(false))
            .with_tabu(TabuConfig::default().with_max_iterations(200))
            .with_parallel(false)
    }

    #[test]
    fn test_report_shape() {
        let report = run_repetitions("demo", &instance(), &small_plan()).unwrap();
        assert_eq!(report.name, "demo");
        assert_eq!(report.num_items, 20);
        assert_eq!(report.runs.len(), 6);
        assert_eq!(report.baselines.len(), 12);
        assert_eq!(report.runs[0].algorithm, Algorithm::Ga);
        assert_eq!(report.runs[1].algorithm, Algorithm::Tabu);
        for run in &report.runs {
            assert!(run.num_bins >= report.lower_bound);
            assert!(run.fitness > 0.0 && run.fitness <= 1.0);
        }
        assert!(report.best_bins(Algorithm::Ga).is_some());
    }

    #[test]
    fn test_repetitions_reproducible() {
        let a = run_repetitions("a", &instance(), &small_plan()).unwrap();
        let b = run_repetitions("b", &instance(), &small_plan()).unwrap();
        for (x, y) in a.runs.iter().zip(&b.runs) {
            assert_eq!(x.pattern, y.pattern);
            assert_eq!(x.num_bins, y.num_bins);
        }
    }

    #[test]
    fn test_baseline_next_fit_fixture() {
        let inst = Instance::from_sizes(10, &[6, 5, 4, 6]).unwrap();
        let summary = baseline(&inst, Heuristic::NextFit, 0);
        assert_eq!(summary.num_bins, 3);
        // (6 + 9 + 6) / 3 bins / 10 capacity
        assert!((summary.avg_fullness - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_plan() {
        let plan = small_plan().with_repetitions(0);
        assert!(matches!(
            run_repetitions("x", &instance(), &plan),
            Err(Error::InvalidConfig(_))
        ));

        let plan = small_plan().with_tabu(TabuConfig::default().with_operators(vec![]));
        assert!(run_repetitions("x", &instance(), &plan).is_err());

        // Only the selected algorithms are validated.
        let plan = small_plan()
            .with_algorithms(vec![Algorithm::Ga])
            .with_tabu(TabuConfig::default().with_operators(vec![]));
        assert!(run_repetitions("x", &instance(), &plan).is_ok());
    }
}
