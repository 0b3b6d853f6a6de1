//! Item catalog.
//!
//! The catalog is the immutable list of knapsack items. Item `i` corresponds
//! to gene `i` of every chromosome.

use rand::Rng;

/// Smallest volume or benefit produced by [`Catalog::random`].
pub const MIN_ITEM_VALUE: u32 = 1;

/// Largest volume or benefit produced by [`Catalog::random`].
pub const MAX_ITEM_VALUE: u32 = 10;

/// A knapsack item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Space the item takes in the knapsack.
    pub volume: u32,
    /// Value gained by packing the item.
    pub benefit: u32,
}

impl Item {
    pub fn new(volume: u32, benefit: u32) -> Self {
        Self { volume, benefit }
    }
}

/// Ordered, read-only list of items.
///
/// # Examples
///
/// ```
/// use knapsack_ga::catalog::{Catalog, Item};
///
/// let catalog = Catalog::new(vec![Item::new(5, 10), Item::new(4, 4)]);
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.get(1).benefit, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Wraps a caller-supplied item list.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Generates `num_items` items with volume and benefit drawn uniformly
    /// from `[MIN_ITEM_VALUE, MAX_ITEM_VALUE]`.
    pub fn random<R: Rng>(num_items: usize, rng: &mut R) -> Self {
        let items = (0..num_items)
            .map(|_| Item {
                volume: rng.random_range(MIN_ITEM_VALUE..=MAX_ITEM_VALUE),
                benefit: rng.random_range(MIN_ITEM_VALUE..=MAX_ITEM_VALUE),
            })
            .collect();
        Self { items }
    }

    /// Returns item `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Item {
        self.items[index]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Sum of all item volumes.
    pub fn total_volume(&self) -> i64 {
        self.items.iter().map(|item| item.volume as i64).sum()
    }
}

impl From<Vec<(u32, u32)>> for Catalog {
    fn from(pairs: Vec<(u32, u32)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(volume, benefit)| Item { volume, benefit })
                .collect(),
        )
    }
}
