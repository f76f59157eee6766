//! Heuristic patterns: the search-space element of both metaheuristics.
//!
//! A [`Pattern`] is a non-empty sequence of [`Heuristic`]s written as a
//! string over `{f, n, w, b}`. Interpreting a pattern against an item
//! sequence applies `pattern[i % len]` to item `i`, which yields a complete
//! packing deterministically.

use super::heuristic::Heuristic;
use super::instance::Instance;
use super::solution::Solution;
use crate::error::{Error, Result};
use rand::Rng;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maximum length of a pattern.
pub const MAX_PATTERN_LENGTH: usize = 10;

/// Non-empty sequence of heuristic symbols.
///
/// The non-empty invariant is enforced by every constructor and mutator:
/// [`remove`](Pattern::remove) refuses to drop the last symbol.
///
/// # Examples
///
/// ```
/// use u_binpack::packing::{Instance, Pattern};
///
/// let pattern: Pattern = "fb".parse().unwrap();
/// let instance = Instance::from_sizes(10, &[2, 5, 4, 7, 1, 3, 8]).unwrap();
/// let solution = pattern.generate_solution(&instance);
/// assert_eq!(solution.num_bins(), 4);
/// assert_eq!(pattern.to_string(), "fb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Pattern(Vec<Heuristic>);

impl Pattern {
    /// Creates a pattern from symbols.
    pub fn new(symbols: Vec<Heuristic>) -> Result<Self> {
        if symbols.is_empty() {
            return Err(Error::EmptyPattern);
        }
        Ok(Self(symbols))
    }

    /// Single-symbol pattern; interpreting it is the plain heuristic.
    pub fn single(heuristic: Heuristic) -> Self {
        Self(vec![heuristic])
    }

    /// Random pattern with length uniform in `[1, max_len]` and each symbol
    /// uniform over the alphabet.
    pub fn random<R: Rng>(rng: &mut R, max_len: usize) -> Self {
        let len = rng.random_range(1..=max_len.max(1));
        Self((0..len).map(|_| Heuristic::random(rng)).collect())
    }

    /// Concatenates `head` and `tail`. `tail` must be non-empty.
    pub(crate) fn joined(head: &[Heuristic], tail: &[Heuristic]) -> Self {
        debug_assert!(!tail.is_empty(), "crossover tail must not be empty");
        let mut symbols = Vec::with_capacity(head.len() + tail.len());
        symbols.extend_from_slice(head);
        symbols.extend_from_slice(tail);
        Self(symbols)
    }

    /// Number of symbols (at least 1).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The symbols as a slice.
    pub fn symbols(&self) -> &[Heuristic] {
        &self.0
    }

    /// Heuristic used for item `index`, cycling through the pattern.
    pub fn heuristic_for(&self, index: usize) -> Heuristic {
        self.0[index % self.0.len()]
    }

    /// Overwrites the symbol at `index`.
    pub fn set(&mut self, index: usize, heuristic: Heuristic) {
        self.0[index] = heuristic;
    }

    /// Inserts a symbol at `index` (`index <= len`).
    pub fn insert(&mut self, index: usize, heuristic: Heuristic) {
        self.0.insert(index, heuristic);
    }

    /// Removes the symbol at `index` unless it is the only one left.
    ///
    /// Returns the removed symbol, or `None` when the pattern has a single
    /// symbol and was left untouched.
    pub fn remove(&mut self, index: usize) -> Option<Heuristic> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(self.0.remove(index))
    }

    /// Swaps two positions.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    /// Truncates to at most `max_len` symbols (never below one).
    pub fn truncate(&mut self, max_len: usize) {
        self.0.truncate(max_len.max(1));
    }

    /// Interprets the pattern against `instance`.
    ///
    /// Seeds one empty bin and applies `self.heuristic_for(i)` to the `i`-th
    /// item. Identical inputs always give identical solutions.
    pub fn generate_solution(&self, instance: &Instance) -> Solution {
        generate_solution(self, instance)
    }
}

/// Interprets `pattern` against the items of `instance`.
pub fn generate_solution(pattern: &Pattern, instance: &Instance) -> Solution {
    let mut bins = vec![super::Bin::new(instance.capacity())];
    for (idx, &item) in instance.items().iter().enumerate() {
        pattern.heuristic_for(idx).apply(item, &mut bins);
    }
    Solution::from_bins(bins)
}

impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let symbols = s
            .chars()
            .map(Heuristic::from_symbol)
            .collect::<Result<Vec<_>>>()?;
        Self::new(symbols)
    }
}

impl TryFrom<String> for Pattern {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Pattern> for String {
    fn from(p: Pattern) -> Self {
        p.to_string()
    }
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for h in &self.0 {
            write!(f, "{}", h.symbol())?;
        }
        Ok(())
    }
}
