//! Seedable random sources shared by the search runners.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a seed.
///
/// Every runner draws all of its randomness from one of these, so a fixed
/// seed replays a run exactly.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from an optional seed, falling back to OS entropy.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}

/// Draws a repetition count uniformly from `[0, upper)`.
///
/// Returns 0 for an empty range instead of panicking, so operators on a
/// single-symbol pattern degrade to a no-op.
pub fn repetitions<R: Rng>(rng: &mut R, upper: usize) -> usize {
    if upper == 0 {
        0
    } else {
        rng.random_range(0..upper)
    }
}
