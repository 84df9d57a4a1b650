//! 128-bit xorshift engine over four 32-bit words.

use rand::{Error, RngCore, SeedableRng};

use super::{bits, fill_bytes_with, Engine};

/// Marsaglia's xor128 generator.
///
/// State is `[x, y, z, w]`. Each step shifts the words down one slot and
/// writes a new `w`, which is also the output. Period `2^128 - 1`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::{Engine, XorShift128};
///
/// let mut engine = XorShift128::default();
/// let value = engine.next_float();
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XorShift128 {
    state: [u32; 4],
}

impl XorShift128 {
    /// State used by `Default` and in place of an all-zero seed.
    pub const DEFAULT_STATE: [u32; 4] = [123_456_789, 362_436_069, 521_288_629, 88_675_123];

    #[inline]
    fn next_state(&mut self) -> u32 {
        let [x, y, z, w] = self.state;
        let t = x ^ (x << 11);
        let next = w ^ (w >> 19) ^ t ^ (t >> 8);
        self.state = [y, z, w, next];
        next
    }
}

impl Default for XorShift128 {
    fn default() -> Self {
        Self {
            state: Self::DEFAULT_STATE,
        }
    }
}

impl Engine for XorShift128 {
    type State = [u32; 4];
    const NAME: &'static str = "XorShift128";

    #[inline]
    fn state(&self) -> [u32; 4] {
        self.state
    }

    #[inline]
    fn set_state(&mut self, state: [u32; 4]) {
        debug_assert!(Self::is_valid_state(&state), "XorShift128 state must not be all zero");
        self.state = state;
    }

    #[inline]
    fn is_valid_state(state: &[u32; 4]) -> bool {
        state.iter().any(|&word| word != 0)
    }

    #[inline]
    fn with_state(state: [u32; 4]) -> Self {
        debug_assert!(Self::is_valid_state(&state), "XorShift128 state must not be all zero");
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

impl RngCore for XorShift128 {
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

impl SeedableRng for XorShift128 {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u32; 4];
        for (word, chunk) in state.iter_mut().zip(seed.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        if Self::is_valid_state(&state) {
            Self { state }
        } else {
            Self::default()
        }
    }
}
