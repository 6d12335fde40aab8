//! Injectable random source
//!
//! Every operation that consumes randomness takes the source explicitly. Replaying
//! the same seed and action sequence reproduces the same draws in the same order.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform samples in `[0, 1)`
pub trait RandomSource {
    fn uniform(&mut self) -> f64;
}

/// Seeded PCG stream shared by the whole episode
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the stream from its seed
    pub fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }
}

impl RandomSource for GameRng {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of samples, cycling when exhausted. Counts draws.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    draws: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, draws: 0 }
    }

    /// Always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of samples handed out so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        let value = self.values[self.draws % self.values.len()];
        self.draws += 1;
        value
    }
}
