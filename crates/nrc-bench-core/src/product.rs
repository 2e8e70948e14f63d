//! # Cartesian Product
//!
//! Lazy odometer over a sequence of option lists.
//!
//! The first list varies slowest and the last list fastest, so the
//! configurations come out in the same order as nested loops written in
//! declared parameter order.

use crate::{BenchError, Configuration, Result};

/// Iterator over every combination of one token per list.
#[derive(Debug, Clone)]
pub struct CartesianProduct<'a> {
    lists: Vec<&'a [String]>,
    /// Current index into each list.
    indices: Vec<usize>,
    /// Combinations not yet yielded.
    remaining: usize,
}

impl<'a> CartesianProduct<'a> {
    /// Create a product over the given lists.
    ///
    /// An empty list makes the product empty. Zero lists yield a single
    /// empty configuration.
    pub fn new(lists: Vec<&'a [String]>) -> Result<Self> {
        let remaining = lists.iter().try_fold(1usize, |acc, list| {
            acc.checked_mul(list.len())
                .ok_or(BenchError::CombinationOverflow)
        })?;

        Ok(Self {
            indices: vec![0; lists.len()],
            lists,
            remaining,
        })
    }

    /// Advance the odometer by one position, last list first.
    fn advance(&mut self) {
        for (slot, list) in self.indices.iter_mut().zip(&self.lists).rev() {
            *slot = slot.saturating_add(1);
            if *slot < list.len() {
                return;
            }
            *slot = 0;
        }
    }
}

impl Iterator for CartesianProduct<'_> {
    type Item = Configuration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let tokens = self
            .indices
            .iter()
            .zip(&self.lists)
            .map(|(&i, list)| list.get(i).cloned())
            .collect::<Option<Vec<_>>>()?;

        self.remaining -= 1;
        self.advance();
        Some(Configuration::new(tokens))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CartesianProduct<'_> {}

// =============================================================================
// TESTS
// =============================================================================
