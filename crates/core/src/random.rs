//! Injectable randomness.
//!
//! Token classification, community selection and candidate picking all draw
//! from a `RandomSource` handed in by the owner, so a seeded source yields
//! reproducible puzzles and tests can script exact draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform random draws.
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform index in `[0, len)`. Callers never pass `len == 0`.
    fn next_index(&mut self, len: usize) -> usize;
}

impl RandomSource for ChaCha8Rng {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Build the default random source: seeded when a seed is given, entropy-seeded otherwise.
pub fn seeded_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(ChaCha8Rng::from_entropy()),
    }
}

/// Pick a uniformly random element of `items`.
pub fn pick<'a, T>(items: &'a [T], random: &mut dyn RandomSource) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(random.next_index(items.len()))
    }
}
