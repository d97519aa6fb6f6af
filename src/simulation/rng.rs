//! Deterministic sequence generator
//!
//! All city generation draws from a single `SeqRng` in a fixed order, so a seed
//! fully determines the layout. The mixing step only uses wrapping `u32`
//! arithmetic, which makes the sequence identical across platforms.

use rand::rand_core::impls;
use rand::RngCore;

const STEP_INCREMENT: u32 = 0x6D2B_79F5;

/// 2^-24, the spacing of the 24-bit floats produced by `next`
const UNIT_SCALE: f32 = 1.0 / 16_777_216.0;

/// Seeded multiply-xor-shift generator
#[derive(Debug, Clone)]
pub struct SeqRng {
    state: u32,
}

impl SeqRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }

    fn step(&mut self) -> u32 {
        self.state = self.state.wrapping_add(STEP_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in [0, 1)
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f32 {
        // The top 24 bits fit an f32 mantissa exactly, so 1.0 is never produced
        (self.step() >> 8) as f32 * UNIT_SCALE
    }

    /// Uniform value in [a, b)
    pub fn range(&mut self, a: f32, b: f32) -> f32 {
        a + (b - a) * self.next()
    }

    /// Uniform integer in [a, b], both ends inclusive
    pub fn int_range(&mut self, a: i32, b: i32) -> i32 {
        let span = (b - a + 1) as f32;
        (a + (self.next() * span).floor() as i32).min(b)
    }
}

impl RngCore for SeqRng {
    fn next_u32(&mut self) -> u32 {
        self.step()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}
