//! Seeding contract shared by both samplers.
//!
//! Samplers own their RNG. The default is `ChaCha8Rng`, whose stream is defined
//! independently of platform and word size, so a seeded sampler replays the same
//! draws everywhere given the same sequence of calls.
//!
//! Unseeded construction pulls a seed from the thread-local RNG and is not
//! reproducible across processes.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Default RNG owned by a sampler.
pub type BagRng = ChaCha8Rng;

/// Build the default RNG, seeded if `seed` is given.
pub fn bag_rng(seed: Option<u64>) -> BagRng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    }
}
