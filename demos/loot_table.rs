//! Loot drops and spawn variety with shuffle bags.
//!
//! Run with `RUST_LOG=shufflebag=trace` to see refills.

use shufflebag::{UniformBag, WeightedBag};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Spawn variety: every enemy kind once before any repeats.
    let mut spawns = UniformBag::with_seed(["goblin", "skeleton", "slime", "bat"], 42)?;
    let waves: Vec<_> = spawns.by_ref().take(8).collect();
    println!("spawn order (two cycles): {waves:?}");

    // Loot: 6 common, 3 uncommon, 1 rare per 10-drop cycle.
    let weights = HashMap::from([("common", 6.0), ("uncommon", 3.0), ("rare", 1.0)]);
    let mut loot = WeightedBag::new(["common", "uncommon", "rare"], Some(weights), Some(7))?;
    println!("cycle length: {}", loot.cycle_len());

    let drops: Vec<_> = (0..10).map(|_| loot.draw()).collect::<Result<_, _>>()?;
    println!("first cycle: {drops:?}");

    // Boost the rare drop for an event; it takes effect at the next refill.
    loot.update_weight(&"rare", 3.0)?;
    let drops: Vec<_> = (0..12).map(|_| loot.draw()).collect::<Result<_, _>>()?;
    println!("event cycle: {drops:?}");

    for (item, w) in loot.weights() {
        println!("  {item:<9} weight={w}");
    }

    Ok(())
}
