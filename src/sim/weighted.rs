//! Weighted random selection

use rand::Rng;

use crate::error::ConfigError;

/// One selectable value and its relative weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEntry<T> {
    pub value: T,
    pub weight: f32,
}

/// Ordered entries picked with probability `weight / total`
#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<WeightedEntry<T>>,
    total: f32,
}

impl<T> WeightedTable<T> {
    /// Build a table; `name` only labels errors
    pub fn new(
        name: &'static str,
        entries: impl IntoIterator<Item = (T, f32)>,
    ) -> Result<Self, ConfigError> {
        let entries: Vec<WeightedEntry<T>> = entries
            .into_iter()
            .map(|(value, weight)| WeightedEntry { value, weight })
            .collect();
        if entries.is_empty() {
            return Err(ConfigError::EmptyTable { table: name });
        }
        for (index, entry) in entries.iter().enumerate() {
            if !entry.weight.is_finite() || entry.weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    table: name,
                    index,
                    weight: entry.weight,
                });
            }
        }
        let total: f32 = entries.iter().map(|e| e.weight).sum();
        if !(total > 0.0 && total.is_finite()) {
            return Err(ConfigError::NonPositiveTotal { table: name, total });
        }
        Ok(Self { entries, total })
    }

    pub fn total_weight(&self) -> f32 {
        self.total
    }

    pub fn entries(&self) -> &[WeightedEntry<T>] {
        &self.entries
    }

    /// Pick one value: draw in `[0, total)` and walk the entries
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let mut r = rng.random_range(0.0..self.total);
        for entry in &self.entries {
            if r < entry.weight {
                return &entry.value;
            }
            r -= entry.weight;
        }
        // Float rounding can walk past the end; the last live entry absorbs it
        self.entries
            .iter()
            .rev()
            .find(|e| e.weight > 0.0)
            .map(|e| &e.value)
            .unwrap_or(&self.entries[0].value)
    }
}
