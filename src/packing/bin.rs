//! Items and capacity-bounded bins.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An item to be packed. Only its size matters to the packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Size of the item; positive for any validated instance.
    pub size: u64,
}

impl Item {
    /// Creates an item of the given size.
    pub const fn new(size: u64) -> Self {
        Self { size }
    }
}

/// A capacity-bounded container.
///
/// The sum of contained item sizes never exceeds `capacity`: the only way to
/// insert is [`try_add`](Bin::try_add), which refuses items that do not fit.
/// The filled space is cached and updated on every insertion.
///
/// # Examples
///
/// ```
/// use u_binpack::packing::{Bin, Item};
///
/// let mut bin = Bin::new(10);
/// assert!(bin.try_add(Item::new(6)));
/// assert!(!bin.try_add(Item::new(5)));
/// assert_eq!(bin.open_space(), 4);
/// assert!((bin.fitness() - 0.36).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Bin {
    capacity: u64,
    items: Vec<Item>,
    filled: u64,
}

impl Bin {
    /// Creates an empty bin.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: u64) -> Self {
        assert!(capacity > 0, "bin capacity must be positive");
        Self {
            capacity,
            items: Vec::new(),
            filled: 0,
        }
    }

    /// Capacity of this bin.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items in the bin.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bin holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `item` would fit into the remaining space.
    pub fn can_add(&self, item: Item) -> bool {
        item.size <= self.open_space()
    }

    /// Adds `item` if it fits. Returns whether the insertion happened.
    pub fn try_add(&mut self, item: Item) -> bool {
        if !self.can_add(item) {
            return false;
        }
        self.items.push(item);
        self.filled += item.size;
        true
    }

    /// Total size of the contained items.
    pub fn filled_space(&self) -> u64 {
        self.filled
    }

    /// Space still available.
    pub fn open_space(&self) -> u64 {
        self.capacity - self.filled
    }

    /// `(filled / capacity)^2`, in `[0, 1]`.
    ///
    /// Squaring rewards nearly full bins superlinearly, so solutions with
    /// fewer, fuller bins score higher than ones with many half-empty bins.
    pub fn fitness(&self) -> f64 {
        let ratio = self.filled as f64 / self.capacity as f64;
        ratio * ratio
    }
}
