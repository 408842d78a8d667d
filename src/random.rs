//! Seeded random number generation.
//!
//! A run draws every random decision (symbol choice, method choice,
//! tournament draws, crossover and mutation points) from one generator
//! created here, so a fixed seed reproduces a run exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the generator used for a whole run.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
