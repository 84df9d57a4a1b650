//! 32-bit xorshift engine (shift triple 13 / 17 / 5).

use rand::{Error, RngCore, SeedableRng};

use super::{bits, fill_bytes_with, Engine};

/// Marsaglia's xorshift32 generator.
///
/// Period `2^32 - 1`; every output is the freshly advanced state, so the
/// engine never yields zero.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::{Engine, XorShift32};
///
/// let mut engine = XorShift32::with_state(1);
/// assert_eq!(engine.next_uint(), 270_369);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// State used by `Default` and in place of an all-zero seed.
    pub const DEFAULT_STATE: u32 = 2_463_534_242;

    #[inline]
    fn next_state(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self {
            state: Self::DEFAULT_STATE,
        }
    }
}

impl Engine for XorShift32 {
    type State = u32;
    const NAME: &'static str = "XorShift32";

    #[inline]
    fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    fn set_state(&mut self, state: u32) {
        debug_assert!(Self::is_valid_state(&state), "XorShift32 state must be non-zero");
        self.state = state;
    }

    #[inline]
    fn is_valid_state(state: &u32) -> bool {
        *state != 0
    }

    #[inline]
    fn with_state(state: u32) -> Self {
        debug_assert!(Self::is_valid_state(&state), "XorShift32 state must be non-zero");
        Self { state }
    }

    #[inline]
    fn next_uint(&mut self) -> u32 {
        self.next_state()
    }

    #[inline]
    fn next_ulong(&mut self) -> u64 {
        let high = self.next_state() as u64;
        let low = self.next_state() as u64;
        (high << 32) | low
    }

    #[inline]
    fn next_double(&mut self) -> f64 {
        bits::unit_f64_from_u32(self.next_state())
    }

    #[inline]
    fn next_double_inclusive(&mut self) -> f64 {
        bits::unit_f64_inclusive_from_u32(self.next_state())
    }

    fn forward(&mut self, steps: u64) {
        for _ in 0..steps {
            self.next_state();
        }
    }
}

impl RngCore for XorShift32 {
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

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        let state = u32::from_le_bytes(seed);
        if state == 0 {
            Self::default()
        } else {
            Self { state }
        }
    }
}
