use crate::field::Field;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Random number generator wrapper for network coding.
///
/// Coefficients are drawn independently and uniformly over the full field,
/// zero included. A dependent draw is therefore possible but its
/// probability decays geometrically with the number of missing ranks, and
/// the decoder discards such packets cheaply.
#[derive(Debug, Clone)]
pub struct CodingRng {
    rng: ChaCha8Rng,
}

impl CodingRng {
    /// Create a new RNG with a random seed.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Create a new RNG with a specific seed, for reproducible coding.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Generate a full coefficient vector.
    pub fn generate_coefficients<F: Field>(&mut self, count: usize) -> Vec<F> {
        (0..count).map(|_| F::random(&mut self.rng)).collect()
    }

    /// Generate a single random coefficient.
    pub fn generate_coefficient<F: Field>(&mut self) -> F {
        F::random(&mut self.rng)
    }
}

impl Default for CodingRng {
    fn default() -> Self {
        Self::new()
    }
}
