//! Random source seam used by combat rolls and wave composition.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform rolls consumed by the simulation.
///
/// Every random decision of the engine goes through this trait so a seeded
/// run replays identically and tests can script exact outcomes.
pub trait RandomSource: fmt::Debug {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f32;

    /// Rolls a percentage check: `[0, 100)` strictly below `percent`.
    fn chance(&mut self, percent: f32) -> bool {
        self.next_unit() * 100.0 < percent
    }

    /// Restarts the sequence from the provided seed.
    fn reseed(&mut self, _seed: u64) {}
}

/// ChaCha backed source for production runs.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Creates a source whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }
}

/// Source replaying a fixed list of rolls, cycling once exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedRandom {
    rolls: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Replays `rolls` in order. An empty list always yields zero.
    #[must_use]
    pub fn new(rolls: Vec<f32>) -> Self {
        Self { rolls, cursor: 0 }
    }

    /// Yields the same roll forever.
    #[must_use]
    pub fn always(roll: f32) -> Self {
        Self::new(vec![roll])
    }

    /// Number of rolls consumed so far.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f32 {
        if self.rolls.is_empty() {
            return 0.0;
        }
        let roll = self.rolls[self.cursor % self.rolls.len()];
        self.cursor += 1;
        roll
    }

    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
    }
}
