//! Write-once store of recorded generations.

use super::population::Population;

/// Population snapshots indexed by generation.
///
/// Capacity is fixed at the generation budget. Each slot is written at most
/// once; recorded populations are never rewritten.
#[derive(Debug, Clone, Default)]
pub struct GenerationHistory {
    slots: Vec<Option<Population>>,
}

impl GenerationHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Stores `population` as generation `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.capacity()` or the slot is already written.
    pub fn record(&mut self, index: usize, population: Population) {
        let capacity = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .unwrap_or_else(|| panic!("generation {index} exceeds budget of {capacity}"));
        assert!(slot.is_none(), "generation {index} already recorded");
        *slot = Some(population);
    }

    /// The population recorded for generation `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Population> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// The highest-indexed recorded population.
    pub fn latest(&self) -> Option<&Population> {
        self.slots.iter().rev().find_map(Option::as_ref)
    }

    /// Recorded generations in index order, with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Population)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|pop| (i, pop)))
    }
}
