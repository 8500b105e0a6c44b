//! Weighted shuffle bag.
//!
//! Each refill expands every item into `replicas(weight)` copies (see
//! [`WeightPolicy`]) and shuffles them. Draws then pick among the remaining
//! copies with probability proportional to weight, walking the bag and
//! accumulating weight until the running total reaches a uniform point in
//! `[0, total)`.
//!
//! The replica expansion bounds repetition the same way the uniform bag does:
//! an item appears at most `replicas(weight)` times per cycle, and exactly that
//! many times once the cycle drains.
//!
//! Weight changes apply from the next refill. Each copy in the bag carries the
//! weight its item had when the cycle started.
//!
//! Cost: O(n) per draw in the bag size, because of the cumulative walk.

use std::collections::HashMap;
use std::hash::Hash;

use rand::prelude::*;

use crate::bag::Bag;
use crate::config::{WeightPolicy, DEFAULT_WEIGHT};
use crate::error::{BagError, Result};
use crate::rng::{bag_rng, BagRng};

/// Weighted sampling without replacement over replica-expanded cycles.
///
/// `T` needs `Eq + Hash` because weights are keyed by item value.
///
/// The per-cycle bound holds per occurrence: an item listed twice shares one
/// weight but contributes `replicas(weight)` copies for each listing.
#[derive(Debug, Clone)]
pub struct WeightedBag<T, R = BagRng> {
    items: Vec<T>,
    weights: HashMap<T, f64>,
    bag: Bag<(T, f64)>,
    policy: WeightPolicy,
    rng: R,
}

impl<T: Clone + Eq + Hash> WeightedBag<T, BagRng> {
    /// Create a sampler with the default [`WeightPolicy`].
    ///
    /// Items missing from `weights` get [`DEFAULT_WEIGHT`]. Fails with
    /// [`BagError::EmptyItemSet`] if `items` is empty, or
    /// [`BagError::InvalidWeight`] for a negative, non-finite, or oversized weight.
    pub fn new<I>(items: I, weights: Option<HashMap<T, f64>>, seed: Option<u64>) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_rng(items, weights, WeightPolicy::default(), bag_rng(seed))
    }
}

impl<T: Clone + Eq + Hash, R: Rng> WeightedBag<T, R> {
    /// Create a sampler with an explicit policy and a caller-supplied RNG.
    pub fn with_rng<I>(
        items: I,
        weights: Option<HashMap<T, f64>>,
        policy: WeightPolicy,
        rng: R,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let (items, weights) = build_weights(items, weights, &policy)?;
        Ok(Self {
            items,
            weights,
            bag: Bag::new(),
            policy,
            rng,
        })
    }

    /// Draw the next item.
    ///
    /// Refills the bag if it is empty. Fails with [`BagError::EmptyCycle`] when
    /// every weight quantizes to zero replicas; the sampler stays usable and a
    /// later draw succeeds once some weight is raised.
    pub fn draw(&mut self) -> Result<T> {
        if self.bag.is_empty() {
            self.refill();
            if self.bag.is_empty() {
                tracing::warn!(items = self.items.len(), "no positive replica counts");
                return Err(BagError::EmptyCycle);
            }
        }

        let total: f64 = self.bag.as_slice().iter().map(|(_, w)| w).sum();
        let point = self.rng.random::<f64>() * total;

        let mut acc = 0.0;
        let mut hit = None;
        for (i, (_, w)) in self.bag.as_slice().iter().enumerate() {
            acc += w;
            if acc >= point {
                hit = Some(i);
                break;
            }
        }

        let (item, _) = match hit {
            Some(i) => self.bag.take(i),
            // Accumulation fell short of `point` by rounding; take the last copy.
            None => self.bag.take_last().ok_or(BagError::EmptyCycle)?,
        };
        Ok(item)
    }

    fn refill(&mut self) {
        let replicas = self.items.iter().flat_map(|item| {
            let w = self.weights.get(item).copied().unwrap_or(DEFAULT_WEIGHT);
            std::iter::repeat((item.clone(), w)).take(self.policy.replicas(w))
        });
        self.bag.refill(replicas, &mut self.rng);
    }

    /// Set the weight of `item` from the next refill on.
    ///
    /// Items outside the reference set are ignored. An invalid weight is handled
    /// per the policy; on rejection the stored weight is unchanged.
    pub fn update_weight(&mut self, item: &T, weight: f64) -> Result<()> {
        let Some(slot) = self.weights.get_mut(item) else {
            tracing::debug!(weight, "ignoring weight update for unknown item");
            return Ok(());
        };
        *slot = self.policy.sanitize(weight)?;
        Ok(())
    }

    /// Batched [`update_weight`](Self::update_weight).
    ///
    /// Entries for unknown items are ignored. Every known entry is validated
    /// first; if any is rejected, no weight changes.
    pub fn update_weights<I>(&mut self, weights: I) -> Result<()>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut staged = Vec::new();
        let mut ignored = 0usize;
        for (item, w) in weights {
            if self.weights.contains_key(&item) {
                staged.push((item, self.policy.sanitize(w)?));
            } else {
                ignored += 1;
            }
        }
        if ignored > 0 {
            tracing::debug!(ignored, "ignoring weight updates for unknown items");
        }
        for (item, w) in staged {
            self.weights.insert(item, w);
        }
        Ok(())
    }

    /// Replace the reference set and weights, discarding the cycle in flight.
    ///
    /// On error the sampler is unchanged.
    pub fn replace_items<I>(&mut self, items: I, weights: Option<HashMap<T, f64>>) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let (items, weights) = build_weights(items, weights, &self.policy)?;
        self.items = items;
        self.weights = weights;
        self.bag.clear();
        Ok(())
    }
}

impl<T: Clone + Eq + Hash, R> WeightedBag<T, R> {
    /// Current weight of `item`, or `0.0` if it is not in the reference set.
    pub fn weight(&self, item: &T) -> f64 {
        self.weights.get(item).copied().unwrap_or(0.0)
    }

    /// `(item, weight)` pairs in reference-set order.
    pub fn weights(&self) -> impl Iterator<Item = (&T, f64)> + '_ {
        self.items.iter().map(move |item| (item, self.weight(item)))
    }

    /// Copies left before the next refill. `0` means the next draw refills.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Copy of the items left in the current cycle, in walk order.
    pub fn peek_remaining(&self) -> Vec<T> {
        self.bag
            .as_slice()
            .iter()
            .map(|(item, _)| item.clone())
            .collect()
    }

    /// End the current cycle; the next draw refills with the current weights.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// The reference set, in the order it was supplied.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Size of the next refill under the current weights.
    pub fn cycle_len(&self) -> usize {
        self.items
            .iter()
            .map(|item| self.policy.replicas(self.weight(item)))
            .fold(0usize, usize::saturating_add)
    }

    /// Policy applied to every weight this sampler stores.
    pub fn policy(&self) -> WeightPolicy {
        self.policy
    }
}

/// Draws until the first [`BagError::EmptyCycle`].
impl<T: Clone + Eq + Hash, R: Rng> Iterator for WeightedBag<T, R> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.draw().ok()
    }
}

fn build_weights<T, I>(
    items: I,
    weights: Option<HashMap<T, f64>>,
    policy: &WeightPolicy,
) -> Result<(Vec<T>, HashMap<T, f64>)>
where
    T: Clone + Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let items: Vec<T> = items.into_iter().collect();
    if items.is_empty() {
        return Err(BagError::EmptyItemSet);
    }

    let mut supplied = weights.unwrap_or_default();
    let mut table = HashMap::with_capacity(items.len());
    for item in &items {
        if table.contains_key(item) {
            continue;
        }
        let w = match supplied.remove(item) {
            Some(w) => policy.sanitize(w)?,
            None => DEFAULT_WEIGHT,
        };
        table.insert(item.clone(), w);
    }
    if !supplied.is_empty() {
        tracing::debug!(
            dropped = supplied.len(),
            "dropping weights for items outside the item set"
        );
    }
    Ok((items, table))
}
