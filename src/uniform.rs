//! Uniform shuffle bag.
//!
//! Every item of the reference set comes out exactly once per cycle, in a fresh
//! random order each cycle. Short runs stay close to uniform: an item can repeat
//! back-to-back only across a cycle boundary.

use rand::prelude::*;

use crate::bag::Bag;
use crate::error::{BagError, Result};
use crate::rng::{bag_rng, BagRng};

/// Sampling without replacement over a fixed item set, refilled when exhausted.
#[derive(Debug, Clone)]
pub struct UniformBag<T, R = BagRng> {
    items: Vec<T>,
    bag: Bag<T>,
    rng: R,
}

impl<T: Clone> UniformBag<T, BagRng> {
    /// Create a sampler over `items`, seeded if `seed` is given.
    ///
    /// Fails with [`BagError::EmptyItemSet`] if `items` is empty.
    pub fn new<I: IntoIterator<Item = T>>(items: I, seed: Option<u64>) -> Result<Self> {
        Self::with_rng(items, bag_rng(seed))
    }

    /// Create a reproducible sampler over `items`.
    pub fn with_seed<I: IntoIterator<Item = T>>(items: I, seed: u64) -> Result<Self> {
        Self::new(items, Some(seed))
    }
}

impl<T: Clone, R: Rng> UniformBag<T, R> {
    /// Create a sampler over `items` drawing from a caller-supplied RNG.
    pub fn with_rng<I: IntoIterator<Item = T>>(items: I, rng: R) -> Result<Self> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(BagError::EmptyItemSet);
        }
        Ok(Self {
            items,
            bag: Bag::new(),
            rng,
        })
    }

    /// Draw the next item, starting a new shuffled cycle if the bag is empty.
    pub fn draw(&mut self) -> T {
        if self.bag.is_empty() {
            self.bag.refill(self.items.iter().cloned(), &mut self.rng);
        }
        let index = self.rng.random_range(0..self.bag.len());
        self.bag.swap_take(index)
    }

    /// Replace the reference set and discard the cycle in flight.
    ///
    /// On error the sampler is unchanged.
    pub fn replace_items<I: IntoIterator<Item = T>>(&mut self, items: I) -> Result<()> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Err(BagError::EmptyItemSet);
        }
        self.items = items;
        self.bag.clear();
        Ok(())
    }
}

impl<T: Clone, R> UniformBag<T, R> {
    /// Items left before the next refill. `0` means the next draw refills.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Copy of the items left in the current cycle.
    pub fn peek_remaining(&self) -> Vec<T> {
        self.bag.as_slice().to_vec()
    }

    /// End the current cycle; the next draw reshuffles the full set.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// The reference set, in the order it was supplied.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of draws in a full cycle.
    pub fn cycle_len(&self) -> usize {
        self.items.len()
    }
}

/// Endless stream of draws.
impl<T: Clone, R: Rng> Iterator for UniformBag<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        Some(self.draw())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
