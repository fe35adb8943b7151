//! Seeded random source shared by galaxy generation and every combat roll.
//!
//! A 64-bit linear congruential generator (Knuth's MMIX constants). It
//! implements `RngCore` and `SeedableRng`, so callers use the ordinary
//! `rand::Rng` API, and it serializes with the rest of the mission so a
//! reloaded mission continues the same random stream.

use rand::{Error, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const INCREMENT: u64 = 1_442_695_040_888_963_407;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        GameRng { state: seed }
    }

    fn step(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }
}

impl RngCore for GameRng {
    fn next_u32(&mut self) -> u32 {
        // Low bits of an LCG have short periods; use the high half.
        (self.step() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for GameRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        GameRng::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        GameRng::new(state)
    }
}
