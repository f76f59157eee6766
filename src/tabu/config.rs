//! Tabu Search configuration.

use super::moves::MoveOperator;
use crate::packing::MAX_PATTERN_LENGTH;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_binpack::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_max_iterations(1000)
///     .with_tabu_tenure(50)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.tabu_tenure, Some(50));
/// assert_eq!(config.max_no_improve, 1000);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct TabuConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Maximum consecutive iterations without improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub max_no_improve: usize,
    /// How many visited patterns stay tabu. `None` keeps every pattern for
    /// the whole run.
    pub tabu_tenure: Option<usize>,
    /// Maximum pattern length for the initial pattern and `Add` moves.
    pub max_pattern_length: usize,
    /// Operators drawn uniformly at each iteration.
    pub operators: Vec<MoveOperator>,
    /// Random seed (None for random).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5000,
            max_no_improve: 1000,
            tabu_tenure: None,
            max_pattern_length: MAX_PATTERN_LENGTH,
            operators: MoveOperator::ALL.to_vec(),
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets maximum iterations without improvement.
    pub fn with_max_no_improve(mut self, n: usize) -> Self {
        self.max_no_improve = n;
        self
    }

    /// Bounds the tabu memory to the `tenure` most recent patterns.
    pub fn with_tabu_tenure(mut self, tenure: usize) -> Self {
        self.tabu_tenure = Some(tenure);
        self
    }

    /// Sets the maximum pattern length.
    pub fn with_max_pattern_length(mut self, n: usize) -> Self {
        self.max_pattern_length = n;
        self
    }

    /// Restricts the move operators.
    pub fn with_operators(mut self, operators: Vec<MoveOperator>) -> Self {
        self.operators = operators;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if self.max_pattern_length == 0 {
            return Err("max_pattern_length must be at least 1".into());
        }
        if self.operators.is_empty() {
            return Err("at least one move operator is required".into());
        }
        if self.tabu_tenure == Some(0) {
            return Err("tabu_tenure must be positive or None".into());
        }
        Ok(())
    }
}
