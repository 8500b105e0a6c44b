//! The bag: a pool of not-yet-drawn items for the current cycle.
//!
//! A cycle starts when a draw finds the bag empty. The sampler refills it from
//! its reference set, shuffles it, and removes one element per draw until the
//! bag is empty again. Elements are removed before they are returned, so none
//! repeats within a cycle.

use rand::prelude::*;

/// Shuffle `items` in place with the Fisher–Yates algorithm.
///
/// For `n` from `len - 1` down to `1`, swap position `n` with a uniformly random
/// position in `[0, n]`. Every permutation is equally likely.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for n in (1..items.len()).rev() {
        let k = rng.random_range(0..=n);
        items.swap(n, k);
    }
}

/// Remaining-to-draw pool for one cycle.
#[derive(Debug, Clone)]
pub struct Bag<T> {
    remaining: Vec<T>,
}

impl<T> Default for Bag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Bag<T> {
    /// Create an empty bag; the first draw refills it.
    pub fn new() -> Self {
        Self {
            remaining: Vec::new(),
        }
    }

    /// Replace the contents with `items` and shuffle them.
    pub fn refill<I, R>(&mut self, items: I, rng: &mut R)
    where
        I: IntoIterator<Item = T>,
        R: Rng + ?Sized,
    {
        self.remaining.clear();
        self.remaining.extend(items);
        fisher_yates(&mut self.remaining, rng);
        tracing::trace!(cycle_len = self.remaining.len(), "bag refilled");
    }

    /// Remove the element at `index`, moving the last element into its slot. O(1).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn swap_take(&mut self, index: usize) -> T {
        self.remaining.swap_remove(index)
    }

    /// Remove the element at `index`, keeping the order of the rest. O(n).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn take(&mut self, index: usize) -> T {
        self.remaining.remove(index)
    }

    /// Remove the last element, if any.
    #[inline]
    pub fn take_last(&mut self) -> Option<T> {
        self.remaining.pop()
    }

    /// Drop everything still in the bag, ending the cycle early.
    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Remaining elements in their current draw order.
    pub fn as_slice(&self) -> &[T] {
        &self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fisher_yates_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut xs: Vec<u32> = (0..50).collect();
        fisher_yates(&mut xs, &mut rng);
        let mut sorted = xs.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn fisher_yates_handles_tiny_slices() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut empty: [u8; 0] = [];
        fisher_yates(&mut empty, &mut rng);
        let mut one = [7u8];
        fisher_yates(&mut one, &mut rng);
        assert_eq!(one, [7]);
    }

    #[test]
    fn fisher_yates_position_distribution_uniform() {
        // Where does element 0 land? Each of the n slots should be equally likely.
        let n = 8;
        let trials = 16_000;
        let mut counts = vec![0usize; n];
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..trials {
            let mut xs: Vec<usize> = (0..n).collect();
            fisher_yates(&mut xs, &mut rng);
            let pos = xs.iter().position(|&x| x == 0).expect("element present");
            counts[pos] += 1;
        }

        let expected = trials as f64 / n as f64;
        let chi2: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected;
                (diff * diff) / expected
            })
            .sum();

        // df = 7; the 0.999 quantile is ~24.3.
        assert!(chi2 < 30.0, "chi2 too large (chi2={chi2:.2}). counts={counts:?}");
    }

    #[test]
    fn refill_replaces_contents() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut bag = Bag::new();
        bag.refill([1, 2, 3], &mut rng);
        assert_eq!(bag.len(), 3);
        let _ = bag.swap_take(0);
        bag.refill([4, 5], &mut rng);
        let mut left = bag.as_slice().to_vec();
        left.sort_unstable();
        assert_eq!(left, vec![4, 5]);
    }

    #[test]
    fn take_preserves_order_of_rest() {
        let mut bag = Bag::new();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        bag.refill(0..6, &mut rng);
        let before = bag.as_slice().to_vec();
        let removed = bag.take(2);
        assert_eq!(removed, before[2]);
        let mut expected = before.clone();
        expected.remove(2);
        assert_eq!(bag.as_slice(), expected.as_slice());
    }

    #[test]
    fn clear_empties() {
        let mut bag = Bag::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        bag.refill(["a", "b"], &mut rng);
        bag.clear();
        assert!(bag.is_empty());
        assert_eq!(bag.take_last(), None);
    }
}
