//! Deterministic pseudo-random numbers
//!
//! Mulberry32: a 32-bit state generator with one odd-constant increment and two
//! xor-shift/multiply rounds per draw. All arithmetic is wrapping `u32`, so the
//! stream for a given seed is identical on every platform.

/// Increment added to the state before every draw (odd, so the state cycles through all 2^32 values)
const INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32 as f64, the divisor that maps a `u32` into [0, 1)
const U32_RANGE: f64 = 4_294_967_296.0;

/// Seeded Mulberry32 generator
///
/// Reseeding (or constructing a new generator with the same seed) restarts the
/// exact same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator for `seed`
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restart the sequence from `seed`
    pub fn reseed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Next value in [0, 1) at full 32-bit resolution
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / U32_RANGE
    }

    /// Next value in [0, 1) as f32
    ///
    /// Uses the top 24 bits so the result can never round up to 1.0.
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Next value in [min, max]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        (min as f64 + (max as f64 - min as f64) * self.next_f64()) as f32
    }
}

impl Iterator for Mulberry32 {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
