use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform indices for string generation.
pub trait RandomSource {
    /// Uniform index in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

pub struct StdRandom {
    inner: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        StdRandom {
            inner: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        StdRandom {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::seeded(s),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn pick(&mut self, upper: usize) -> usize {
        self.inner.gen_range(0..upper)
    }
}
