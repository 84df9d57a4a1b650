//! 64-bit xorshift engine (shift triple 13 / 7 / 17).

use rand::{Error, RngCore, SeedableRng};

use super::{bits, fill_bytes_with, Engine};

/// Marsaglia's xorshift64 generator.
///
/// Period `2^64 - 1`. 32-bit draws use the high half of a 64-bit draw.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// State used by `Default` and in place of an all-zero seed.
    pub const DEFAULT_STATE: u64 = 88_172_645_463_325_252;

    #[inline]
    fn next_state(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for XorShift64 {
    fn default() -> Self {
        Self {
            state: Self::DEFAULT_STATE,
        }
    }
}

impl Engine for XorShift64 {
    type State = u64;
    const NAME: &'static str = "XorShift64";

    #[inline]
    fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn set_state(&mut self, state: u64) {
        debug_assert!(Self::is_valid_state(&state), "XorShift64 state must be non-zero");
        self.state = state;
    }

    #[inline]
    fn is_valid_state(state: &u64) -> bool {
        *state != 0
    }

    #[inline]
    fn with_state(state: u64) -> Self {
        debug_assert!(Self::is_valid_state(&state), "XorShift64 state must be non-zero");
        Self { state }
    }

    #[inline]
    fn next_uint(&mut self) -> u32 {
        (self.next_state() >> 32) as u32
    }

    #[inline]
    fn next_ulong(&mut self) -> u64 {
        self.next_state()
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        bits::unit_f64(self.next_state())
    }

    #[inline]
    fn next_double_inclusive(&mut self) -> f64 {
        bits::unit_f64_inclusive(self.next_state())
    }

    fn forward(&mut self, steps: u64) {
        for _ in 0..steps {
            self.next_state();
        }
    }
}

impl RngCore for XorShift64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.next_uint()
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_ulong()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_with(dest, || self.next_state().to_le_bytes());
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for XorShift64 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let state = u64::from_le_bytes(seed);
        if state == 0 {
            Self::default()
        } else {
            Self { state }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_from_one() {
        let mut x: u64 = 1;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;

        let mut engine = XorShift64::with_state(1);
        assert_eq!(engine.next_ulong(), x);
        // 1 -> 0x2001 -> 0x2001 ^ 0x40 -> ^ << 17
        assert_eq!(x, 0x2041 ^ (0x2041 << 17));
    }

    #[test]
    fn test_next_uint_is_high_half() {
        let mut a = XorShift64::with_state(12_345);
        let mut b = a.clone();
        assert_eq!(a.next_uint(), (b.next_ulong() >> 32) as u32);
    }

    #[test]
    fn test_zero_seed_falls_back_to_default() {
        assert_eq!(XorShift64::from_seed([0; 8]).state(), XorShift64::DEFAULT_STATE);
        assert_eq!(XorShift64::from_seed(3u64.to_le_bytes()).state(), 3);
    }
}
