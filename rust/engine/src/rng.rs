//! Per-thread multiply-with-carry generator.
//!
//! Two 16-bit multiply-with-carry lanes packed into 32-bit words, with the
//! carry held in the upper half of each lane:
//!
//! ```text
//! x(n) = a * (x(n-1) & 0xFFFF) + (x(n-1) >> 16)
//! y(n) = b * (y(n-1) & 0xFFFF) + (y(n-1) >> 16)
//! out  = (x(n) << 16) + (y(n) & 0xFFFF)
//! ```
//!
//! The generator is not synchronized. Every worker thread owns its own
//! instance; nothing in this crate ever shares one across threads.
//!
//! ```
//! use cardsim_engine::rng::MwcRng;
//!
//! let mut a = MwcRng::with_seed(7, 11);
//! let mut b = MwcRng::with_seed(7, 11);
//! assert_eq!(a.next_u32(), b.next_u32());
//!
//! let roll = a.range(1, 6);
//! assert!((1..=6).contains(&roll));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// Lane X seed used when a caller seeds with zero.
pub const DEFAULT_SEED_X: u32 = 521_288_629;
/// Lane Y seed used when a caller seeds with zero.
pub const DEFAULT_SEED_Y: u32 = 362_436_069;

/// Multipliers giving full-period 16-bit multiply-with-carry lanes.
/// Any two distinct entries may be used for `a` and `b`.
pub const VALID_MULTIPLIERS: [u32; 80] = [
    18000, 18030, 18273, 18513, 18879, 19074, 19098, 19164, 19215, 19584, //
    19599, 19950, 20088, 20508, 20544, 20664, 20814, 20970, 21153, 21243, //
    21423, 21723, 21954, 22125, 22188, 22293, 22860, 22938, 22965, 22974, //
    23109, 23124, 23163, 23208, 23508, 23520, 23553, 23658, 23865, 24114, //
    24219, 24660, 24699, 24864, 24948, 25023, 25308, 25443, 26004, 26088, //
    26154, 26550, 26679, 26838, 27183, 27258, 27753, 27795, 27810, 27834, //
    27960, 28320, 28380, 28689, 28710, 28794, 28854, 28959, 28980, 29013, //
    29379, 29889, 30135, 30345, 30459, 30714, 30903, 30963, 31059, 31083, //
];

/// The pair of lane multipliers, injected at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multipliers {
    a: u32,
    b: u32,
}

impl Multipliers {
    /// Both values must come from [`VALID_MULTIPLIERS`] and differ.
    pub fn new(a: u32, b: u32) -> Result<Self, EngineError> {
        if a == b || !VALID_MULTIPLIERS.contains(&a) || !VALID_MULTIPLIERS.contains(&b) {
            return Err(EngineError::InvalidMultipliers { a, b });
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn b(&self) -> u32 {
        self.b
    }
}

impl Default for Multipliers {
    fn default() -> Self {
        Self { a: 18000, b: 30903 }
    }
}

#[derive(Debug, Clone)]
pub struct MwcRng {
    x: u32,
    y: u32,
    multipliers: Multipliers,
}

impl MwcRng {
    /// A generator in the default seed state.
    pub fn new(multipliers: Multipliers) -> Self {
        Self {
            x: DEFAULT_SEED_X,
            y: DEFAULT_SEED_Y,
            multipliers,
        }
    }

    /// Default multipliers, seeded with `(seed1, seed2)`.
    pub fn with_seed(seed1: u32, seed2: u32) -> Self {
        let mut rng = Self::new(Multipliers::default());
        rng.seed(seed1, seed2);
        rng
    }

    /// Reset both lanes. A zero seed selects that lane's default.
    pub fn seed(&mut self, seed1: u32, seed2: u32) {
        self.x = if seed1 != 0 { seed1 } else { DEFAULT_SEED_X };
        self.y = if seed2 != 0 { seed2 } else { DEFAULT_SEED_Y };
    }

    pub fn state(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn multipliers(&self) -> Multipliers {
        self.multipliers
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let Multipliers { a, b } = self.multipliers;
        self.x = a.wrapping_mul(self.x & 0xFFFF).wrapping_add(self.x >> 16);
        self.y = b.wrapping_mul(self.y & 0xFFFF).wrapping_add(self.y >> 16);
        (self.x << 16).wrapping_add(self.y & 0xFFFF)
    }

    /// Integer in `[low, high]`, both inclusive.
    ///
    /// Reduces `next_u32() / 2` modulo the span, so results carry a small
    /// modulo bias. Callers must pass `low <= high`.
    #[inline]
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        debug_assert!(low <= high, "range called with low > high");
        let span = i64::from(high) - i64::from(low) + 1;
        let r = i64::from(self.next_u32() / 2);
        (r % span + i64::from(low)) as i32
    }

    /// Index in `[0, len)`. `len` must be in `1..=i32::MAX`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len >= 1 && len <= i32::MAX as usize);
        self.range(0, (len - 1) as i32) as usize
    }
}

impl RngCore for MwcRng {
    fn next_u32(&mut self) -> u32 {
        MwcRng::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let hi = u64::from(MwcRng::next_u32(self));
        let lo = u64::from(MwcRng::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dst)
    }
}

/// Seed pair from wall-clock seconds and the calling thread's identity.
///
/// Two threads starting in the same second still receive different pairs
/// because their thread ids hash differently.
pub fn entropy_seed_pair() -> (u32, u32) {
    let now = chrono::Utc::now().timestamp() as u32;
    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    let id = hasher.finish() as u32;
    (now ^ id, now ^ id.wrapping_add(100))
}

/// Reproducible seed pair for one worker of a fixed-seed run.
pub fn derived_seed_pair(base: u64, worker: usize) -> (u32, u32) {
    let stream = (worker as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut seeder = ChaCha8Rng::seed_from_u64(base ^ stream);
    (seeder.next_u32(), seeder.next_u32())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seeds_fall_back_to_defaults() {
        let rng = MwcRng::with_seed(0, 0);
        assert_eq!(rng.state(), (DEFAULT_SEED_X, DEFAULT_SEED_Y));

        let rng = MwcRng::with_seed(5, 0);
        assert_eq!(rng.state(), (5, DEFAULT_SEED_Y));
    }

    #[test]
    fn default_state_produces_reference_sequence() {
        let mut rng = MwcRng::with_seed(0, 0);
        let seq: Vec<u32> = (0..3).map(|_| rng.next_u32()).collect();
        assert_eq!(seq, vec![1_168_299_085, 520_487_819, 1_761_612_921]);
    }

    #[test]
    fn identical_seeds_identical_sequences() {
        let mut a = MwcRng::with_seed(123, 456);
        let mut b = MwcRng::with_seed(123, 456);
        for _ in 0..1000 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn reseeding_restarts_the_sequence() {
        let mut rng = MwcRng::with_seed(99, 101);
        let first: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        rng.seed(99, 101);
        let again: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn range_handles_degenerate_and_extreme_spans() {
        let mut rng = MwcRng::with_seed(1, 2);
        for _ in 0..100 {
            assert_eq!(rng.range(4, 4), 4);
            let wide = rng.range(i32::MIN, i32::MAX);
            assert!(wide < 0, "next_u32 / 2 never exceeds i32::MAX");
            let n = rng.range(-3, 3);
            assert!((-3..=3).contains(&n));
        }
    }

    #[test]
    fn multipliers_must_be_listed_and_distinct() {
        assert!(Multipliers::new(18000, 30903).is_ok());
        assert_eq!(
            Multipliers::new(18000, 18000),
            Err(EngineError::InvalidMultipliers { a: 18000, b: 18000 })
        );
        assert!(Multipliers::new(12345, 30903).is_err());
    }

    #[test]
    fn multipliers_change_the_stream() {
        let mut a = MwcRng::new(Multipliers::default());
        let mut b = MwcRng::new(Multipliers::new(18030, 31083).unwrap());
        let sa: Vec<u32> = (0..5).map(|_| a.next_u32()).collect();
        let sb: Vec<u32> = (0..5).map(|_| b.next_u32()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn derived_pairs_are_reproducible_and_distinct_per_worker() {
        assert_eq!(derived_seed_pair(42, 0), derived_seed_pair(42, 0));
        assert_ne!(derived_seed_pair(42, 0), derived_seed_pair(42, 1));
        assert_ne!(derived_seed_pair(42, 0), derived_seed_pair(43, 0));
    }

    #[test]
    fn entropy_pairs_differ_between_threads() {
        let main = entropy_seed_pair();
        let other = std::thread::spawn(entropy_seed_pair).join().unwrap();
        assert_ne!(main, other);
    }

    #[test]
    fn rng_core_fill_bytes_is_deterministic() {
        let mut a = MwcRng::with_seed(3, 4);
        let mut b = MwcRng::with_seed(3, 4);
        let mut ba = [0u8; 13];
        let mut bb = [0u8; 13];
        RngCore::fill_bytes(&mut a, &mut ba);
        RngCore::fill_bytes(&mut b, &mut bb);
        assert_eq!(ba, bb);
    }
}
