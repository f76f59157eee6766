//! Low-level packing heuristics.
//!
//! Each [`Heuristic`] decides, for one item and the current bin list, which
//! bin receives the item. When no bin can take it, a new bin of the same
//! capacity is appended and the item goes there.
//!
//! The set is closed: pattern symbols map onto the variants through
//! [`Heuristic::from_symbol`], and [`Heuristic::ALL`] is the read-only
//! alphabet used by random pattern generation and the move operators.
//!
//! # References
//!
//! - Johnson (1973), *Near-Optimal Bin Packing Algorithms*
//! - Coffman, Garey & Johnson (1996), "Approximation Algorithms for Bin
//!   Packing: A Survey"

use super::bin::{Bin, Item};
use crate::error::{Error, Result};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A deterministic bin-selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Heuristic {
    /// First bin (oldest first) with enough open space.
    FirstFit,
    /// Only the most recently opened bin; never revisits earlier bins.
    ///
    /// The cheap, myopic baseline.
    NextFit,
    /// Fitting bin with the least filled space (most room left).
    WorstFit,
    /// Fitting bin with the most filled space (least room left).
    BestFit,
}

impl Heuristic {
    /// The pattern alphabet, in symbol order `f, n, w, b`.
    pub const ALL: [Heuristic; 4] = [
        Heuristic::FirstFit,
        Heuristic::NextFit,
        Heuristic::WorstFit,
        Heuristic::BestFit,
    ];

    /// Pattern symbol for this heuristic.
    pub const fn symbol(self) -> char {
        match self {
            Heuristic::FirstFit => 'f',
            Heuristic::NextFit => 'n',
            Heuristic::WorstFit => 'w',
            Heuristic::BestFit => 'b',
        }
    }

    /// Parses a pattern symbol.
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            'f' => Ok(Heuristic::FirstFit),
            'n' => Ok(Heuristic::NextFit),
            'w' => Ok(Heuristic::WorstFit),
            'b' => Ok(Heuristic::BestFit),
            other => Err(Error::UnknownSymbol(other)),
        }
    }

    /// Human-readable name, e.g. `"FirstFit"`.
    pub const fn name(self) -> &'static str {
        match self {
            Heuristic::FirstFit => "FirstFit",
            Heuristic::NextFit => "NextFit",
            Heuristic::WorstFit => "WorstFit",
            Heuristic::BestFit => "BestFit",
        }
    }

    /// Draws a heuristic uniformly from [`ALL`](Self::ALL).
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Index of the bin this heuristic would place `item` into, or `None`
    /// if a new bin must be opened.
    ///
    /// Ties are broken by first occurrence in `bins`.
    pub fn select(self, item: Item, bins: &[Bin]) -> Option<usize> {
        match self {
            Heuristic::FirstFit => bins.iter().position(|b| b.can_add(item)),
            Heuristic::NextFit => {
                let last = bins.len().checked_sub(1)?;
                bins[last].can_add(item).then_some(last)
            }
            Heuristic::BestFit => {
                let mut best: Option<(usize, u64)> = None;
                for (idx, bin) in bins.iter().enumerate() {
                    if !bin.can_add(item) {
                        continue;
                    }
                    let filled = bin.filled_space();
                    if best.is_none_or(|(_, f)| filled > f) {
                        best = Some((idx, filled));
                    }
                }
                best.map(|(idx, _)| idx)
            }
            Heuristic::WorstFit => {
                let mut worst: Option<(usize, u64)> = None;
                for (idx, bin) in bins.iter().enumerate() {
                    if !bin.can_add(item) {
                        continue;
                    }
                    let filled = bin.filled_space();
                    if worst.is_none_or(|(_, f)| filled < f) {
                        worst = Some((idx, filled));
                    }
                }
                worst.map(|(idx, _)| idx)
            }
        }
    }

    /// Places `item` into `bins`, opening a new bin when nothing fits.
    ///
    /// The caller must size-check items against the capacity beforehand
    /// ([`Instance::new`](super::Instance::new) does this).
    ///
    /// # Panics
    /// Panics if `bins` is empty, or if `item` is larger than the capacity.
    pub fn apply(self, item: Item, bins: &mut Vec<Bin>) {
        assert!(!bins.is_empty(), "heuristics require at least one seed bin");

        match self.select(item, bins) {
            Some(idx) => {
                let placed = bins[idx].try_add(item);
                debug_assert!(placed, "selected bin must accept the item");
            }
            None => {
                let mut bin = Bin::new(bins[0].capacity());
                assert!(
                    bin.try_add(item),
                    "item of size {} exceeds bin capacity {}",
                    item.size,
                    bin.capacity()
                );
                bins.push(bin);
            }
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
