//! Helpers for deterministic vitals regression tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

pub const DEFAULT_SEED: u64 = 42;

/// Derives a reproducible sequence of hazard hits for damage replay tests.
/// The range matches the arena's default hazard magnitudes.
pub fn damage_script(seed: u64, hits: usize) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..hits).map(|_| rng.gen_range(8..=30)).collect()
}

/// Summarizes a damage script for failure messages and report attachments.
pub fn script_digest(seed: u64, script: &[i32]) -> serde_json::Value {
    json!({
        "hits": script.len(),
        "seed": seed,
        "total": script.iter().sum::<i32>(),
    })
}
