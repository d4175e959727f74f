// file: src/catalog/random.rs
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the index used to pick among catalog alternatives.
///
/// `pick(len)` is only called with `len > 0` and must return a value in
/// `0..len`; out-of-range values are wrapped by the caller.
pub trait RandomSource: Send {
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform draws from an entropy-seeded generator.
pub struct SystemRandom {
    rng: StdRng,
}

impl SystemRandom {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SystemRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

impl<F> RandomSource for F
where
    F: FnMut(usize) -> usize + Send,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_random_stays_in_range() {
        let mut random = SystemRandom::new();
        for _ in 0..500 {
            assert!(random.pick(6) < 6);
        }
        assert_eq!(random.pick(1), 0);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = SystemRandom::seeded(42);
        let mut b = SystemRandom::seeded(42);
        let draws_a: Vec<usize> = (0..20).map(|_| a.pick(6)).collect();
        let draws_b: Vec<usize> = (0..20).map(|_| b.pick(6)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_closure_source() {
        let mut last = |len: usize| len - 1;
        assert_eq!(last.pick(4), 3);
    }
}
