//! `shufflebag`: shuffle-bag samplers.
//!
//! Draw an unbounded sequence from a fixed multiset without long streaks:
//! each cycle hands out the whole bag once, in a fresh random order, then
//! refills. Seeded samplers replay identically.
//!
//! Exposed modules:
//! - `uniform`: every item once per cycle.
//! - `weighted`: items replicated by rounded weight, drawn proportionally to weight.
//! - `bag`: the shared remaining-to-draw pool and Fisher–Yates shuffle.
//! - `config`: weight validation and quantization policy.
//! - `rng`: the seeding contract (`ChaCha8Rng` by default).
//!
//! Not for cryptographic use.
//!
//! Samplers hold mutable state and no locks. To share one across threads, wrap
//! it in a `Mutex` or keep it on a single owning task.

#![forbid(unsafe_code)]

pub mod bag;
pub mod config;
pub mod error;
pub mod rng;
pub mod uniform;
pub mod weighted;

pub use bag::{fisher_yates, Bag};
pub use config::{InvalidWeight, Rounding, WeightPolicy, DEFAULT_WEIGHT, MAX_REPLICAS};
pub use error::{BagError, Result};
pub use rng::{bag_rng, BagRng};
pub use uniform::UniformBag;
pub use weighted::WeightedBag;
