use rand::Rng;

use crate::engine::RandomSource;

/// Системный RNG (thread_rng) для живой игры.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn pick_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..upper)
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Один и тот же seed даёт одну и ту же последовательность выпадений.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn pick_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }
}
