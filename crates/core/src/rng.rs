//! Seeded random streams: one root per session, derived child streams per subsystem.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

/// Minimal draw interface so generators and AI can be driven by scripted values in tests.
pub trait RandomSource {
    fn draw_u64(&mut self) -> u64;

    /// Integer in `min..max_exclusive`. A degenerate range yields `min`.
    fn range(&mut self, min: i32, max_exclusive: i32) -> i32 {
        if max_exclusive <= min {
            return min;
        }
        let span = (i64::from(max_exclusive) - i64::from(min)) as u64;
        min + (self.draw_u64() % span) as i32
    }

    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.draw_u64() % len as u64) as usize)
    }

    /// Child stream seeded by one draw from this stream.
    fn derive(&mut self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.draw_u64())
    }
}

impl RandomSource for ChaCha8Rng {
    fn draw_u64(&mut self) -> u64 {
        Rng::next_u64(self)
    }
}

#[derive(Clone, Debug)]
pub struct SessionRng {
    seed: u64,
    root: ChaCha8Rng,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self { seed, root: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn map_stream(&mut self) -> ChaCha8Rng {
        self.root.derive()
    }

    pub fn population_stream(&mut self) -> ChaCha8Rng {
        self.root.derive()
    }
}
