//! Uniform piece randomizer
//!
//! Every kind is equally likely on every draw. There is no bag, so droughts
//! and repeats are possible.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the next tetromino kind
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: ChaCha8Rng,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer {
    /// Create a randomizer with a fresh random seed
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a reproducible randomizer
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draw the next kind
    pub fn next(&mut self) -> TetrominoType {
        let kinds = TetrominoType::all();
        kinds[self.rng.gen_range(0..kinds.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Randomizer::with_seed(42);
        let mut b = Randomizer::with_seed(42);
        for _ in 0..50 {
            assert_eq!(a.next(), b.next());
        }
    }

    #[test]
    fn test_all_kinds_show_up() {
        let mut randomizer = Randomizer::with_seed(7);
        let seen: HashSet<_> = (0..500).map(|_| randomizer.next()).collect();
        assert_eq!(seen.len(), 7);
    }
}
