//! Random number generation for level builds
//!
//! Uses a seeded ChaCha RNG so a seed reproduces a level exactly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Map generation random number generator
///
/// Wraps ChaCha8Rng and remembers its seed for logging and replays.
#[derive(Debug, Clone)]
pub struct MapRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl MapRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform draw in `[0, 1)`
    pub fn uniform(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// Returns true with probability `p` (strict `draw < p`)
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.rng.gen_range(0..n)
    }
}
