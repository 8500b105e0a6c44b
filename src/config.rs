//! Weight policy for the weighted sampler.
//!
//! Two choices are explicit here rather than baked in:
//! - what happens to a negative, NaN, infinite, or oversized weight ([`InvalidWeight`]);
//! - how a weight becomes an integer replica count ([`Rounding`]).
//!
//! Quantization means a small positive weight (below 0.5) contributes no replicas
//! and the item sits out the whole cycle. That is part of the sampling contract.

use crate::error::{BagError, Result};

/// Weight given to an item that has no entry in the weight map.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Handling of weights that are negative, NaN, infinite, or over the replica cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidWeight {
    /// Fail with [`BagError::InvalidWeight`] and leave state untouched.
    #[default]
    Reject,
    /// Replace a negative or non-finite weight with `0.0`, which excludes the item
    /// from future cycles, and cap an oversized one at the replica limit.
    Clamp,
}

/// Rounding used to turn a weight into a replica count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Round half to even: `0.5 → 0`, `2.5 → 2`, `3.5 → 4`.
    #[default]
    HalfEven,
    /// Round half away from zero: `0.5 → 1`, `2.5 → 3`.
    HalfAwayFromZero,
}

/// Default cap on the replicas a single item may contribute to one cycle.
pub const MAX_REPLICAS: usize = 1 << 16;

/// How a [`WeightedBag`](crate::WeightedBag) validates and quantizes weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightPolicy {
    /// What to do with a weight that is negative, not finite, or too large.
    pub invalid: InvalidWeight,
    /// Rounding from weight to replica count.
    pub rounding: Rounding,
    /// Largest replica count accepted for one item.
    pub max_replicas: usize,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self::new(InvalidWeight::default(), Rounding::default())
    }
}

impl WeightPolicy {
    /// Policy with the given handling and rounding, capped at [`MAX_REPLICAS`].
    pub fn new(invalid: InvalidWeight, rounding: Rounding) -> Self {
        Self {
            invalid,
            rounding,
            max_replicas: MAX_REPLICAS,
        }
    }

    /// Replace the per-item replica cap.
    pub fn with_max_replicas(mut self, max_replicas: usize) -> Self {
        self.max_replicas = max_replicas;
        self
    }

    /// Validate `weight`, returning the value to store.
    ///
    /// A finite weight whose replica count would exceed `max_replicas` counts as
    /// invalid. Under [`InvalidWeight::Clamp`] it is capped at `max_replicas`;
    /// negative and non-finite weights become `0.0`.
    pub fn sanitize(&self, weight: f64) -> Result<f64> {
        let finite = weight.is_finite() && weight >= 0.0;
        if finite && self.rounded(weight) <= self.max_replicas as f64 {
            return Ok(weight);
        }
        match self.invalid {
            InvalidWeight::Reject => Err(BagError::InvalidWeight { weight }),
            InvalidWeight::Clamp if finite => {
                tracing::warn!(weight, cap = self.max_replicas, "capping oversized weight");
                Ok(self.max_replicas as f64)
            }
            InvalidWeight::Clamp => {
                tracing::warn!(weight, "clamping invalid weight to 0");
                Ok(0.0)
            }
        }
    }

    /// Number of copies of an item with `weight` placed in one cycle, at most
    /// `max_replicas`.
    pub fn replicas(&self, weight: f64) -> usize {
        let rounded = self.rounded(weight);
        // NaN fails the comparison too; the float-to-int cast saturates.
        if rounded >= 1.0 {
            (rounded as usize).min(self.max_replicas)
        } else {
            0
        }
    }

    fn rounded(&self, weight: f64) -> f64 {
        match self.rounding {
            Rounding::HalfEven => weight.round_ties_even(),
            Rounding::HalfAwayFromZero => weight.round(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_policy_rejects_bad_weights() {
        let p = WeightPolicy::default();
        assert_eq!(p.sanitize(2.5), Ok(2.5));
        assert_eq!(p.sanitize(0.0), Ok(0.0));
        assert_eq!(
            p.sanitize(-1.0),
            Err(BagError::InvalidWeight { weight: -1.0 })
        );
        assert!(matches!(
            p.sanitize(f64::NAN),
            Err(BagError::InvalidWeight { weight }) if weight.is_nan()
        ));
        assert!(p.sanitize(f64::INFINITY).is_err());
    }

    #[test]
    fn clamp_policy_zeroes_bad_weights() {
        let p = WeightPolicy::new(InvalidWeight::Clamp, Rounding::HalfEven);
        assert_eq!(p.sanitize(-3.0), Ok(0.0));
        assert_eq!(p.sanitize(f64::NAN), Ok(0.0));
        assert_eq!(p.sanitize(f64::INFINITY), Ok(0.0));
        assert_eq!(p.sanitize(4.0), Ok(4.0));
    }

    #[test]
    fn half_even_rounding() {
        let p = WeightPolicy::default();
        assert_eq!(p.replicas(0.4), 0);
        assert_eq!(p.replicas(0.5), 0);
        assert_eq!(p.replicas(0.6), 1);
        assert_eq!(p.replicas(1.5), 2);
        assert_eq!(p.replicas(2.5), 2);
        assert_eq!(p.replicas(3.5), 4);
        assert_eq!(p.replicas(-2.0), 0);
    }

    #[test]
    fn half_away_rounding() {
        let p = WeightPolicy::new(InvalidWeight::Reject, Rounding::HalfAwayFromZero);
        assert_eq!(p.replicas(0.5), 1);
        assert_eq!(p.replicas(2.5), 3);
        assert_eq!(p.replicas(0.49), 0);
    }

    #[test]
    fn oversized_weights_hit_the_replica_cap() {
        let p = WeightPolicy::default().with_max_replicas(10);
        assert_eq!(p.sanitize(10.4), Ok(10.4));
        assert_eq!(p.sanitize(11.0), Err(BagError::InvalidWeight { weight: 11.0 }));
        assert!(WeightPolicy::default().sanitize(1e12).is_err());
        assert_eq!(p.replicas(1e20), 10);

        let clamp = WeightPolicy::new(InvalidWeight::Clamp, Rounding::HalfEven)
            .with_max_replicas(10);
        assert_eq!(clamp.sanitize(1e12), Ok(10.0));
        assert_eq!(clamp.sanitize(f64::INFINITY), Ok(0.0));
        assert_eq!(clamp.replicas(10.0), 10);
    }
}
