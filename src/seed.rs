//! Deterministic fan-out from one global seed to one PRNG seed per rank.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

/// Draw `n_proc` 32-bit seeds from a generator seeded with `global_seed`.
/// Process `r` uses `seeds()[r]`; this gives reproducibility for a fixed
/// `(seed, n_proc)` pair while breaking correlation between tiles.
///
/// For a single process the global seed is used directly (see `rank_seed`).
pub fn fan_out(global_seed: i64, n_proc: u32) -> Vec<u32> {
    let mut rng = StdRng::seed_from_u64(global_seed as u64);
    (0..n_proc).map(|_| rng.random::<u32>()).collect()
}

/// The per-rank seed this process should use to fill its interior.
pub fn rank_seed(global_seed: i64, n_proc: u32, rank: i32) -> u32 {
    if n_proc == 1 {
        return global_seed as u32;
    }
    fan_out(global_seed, n_proc)[rank as usize]
}
