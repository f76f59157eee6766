//! Validated problem instances.

use super::bin::Item;
use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::Serialize;

/// A bin capacity together with the ordered item sequence to pack.
///
/// Construction validates the input once, so the heuristics can rely on
/// every item fitting into an empty bin.
///
/// # Examples
///
/// ```
/// use u_binpack::packing::Instance;
///
/// let instance = Instance::from_sizes(10, &[2, 5, 4, 7, 1, 3, 8]).unwrap();
/// assert_eq!(instance.len(), 7);
/// assert_eq!(instance.lower_bound(), 3);
///
/// assert!(Instance::from_sizes(10, &[11]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Instance {
    capacity: u64,
    items: Vec<Item>,
}

impl Instance {
    /// Validates and creates an instance.
    ///
    /// Rejects a zero capacity, an empty item list, zero-size items and
    /// items larger than the capacity.
    pub fn new(capacity: u64, items: Vec<Item>) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if items.is_empty() {
            return Err(Error::EmptyItems);
        }
        for (index, item) in items.iter().enumerate() {
            if item.size == 0 {
                return Err(Error::ZeroItemSize { index });
            }
            if item.size > capacity {
                return Err(Error::ItemTooLarge {
                    index,
                    size: item.size,
                    capacity,
                });
            }
        }
        Ok(Self { capacity, items })
    }

    /// Convenience constructor from raw sizes.
    pub fn from_sizes(capacity: u64, sizes: &[u64]) -> Result<Self> {
        Self::new(capacity, sizes.iter().copied().map(Item::new).collect())
    }

    /// Bin capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Items in packing order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false` for a validated instance.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item sizes.
    ///
    /// Widened to `u128` so large capacities cannot overflow the sum.
    pub fn total_size(&self) -> u128 {
        self.items.iter().map(|i| u128::from(i.size)).sum()
    }

    /// Trivial lower bound on the bin count: `ceil(total / capacity)`.
    pub fn lower_bound(&self) -> usize {
        // Never exceeds the item count, since every item fits one bin.
        self.total_size().div_ceil(u128::from(self.capacity)) as usize
    }

    /// Returns a copy with the item order shuffled.
    ///
    /// Searches treat the item order as fixed; experiment drivers reshuffle
    /// between repetitions.
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> Self {
        let mut items = self.items.clone();
        items.shuffle(rng);
        Self {
            capacity: self.capacity,
            items,
        }
    }
}
