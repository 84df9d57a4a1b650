//! xoroshiro128+ engine (rotate 24 / shift 16 / rotate 37).

use rand::{Error, RngCore, SeedableRng};

use super::{bits, fill_bytes_with, Engine};

/// Jump polynomial equivalent to `2^64` calls of the recurrence.
const JUMP: [u64; 2] = [0xdf90_0294_d8f5_54a5, 0x1708_65df_4b32_01fc];

/// Jump polynomial equivalent to `2^96` calls of the recurrence.
const LONG_JUMP: [u64; 2] = [0xd2a9_8b26_625e_ee7b, 0xdddf_9b10_90aa_7ac1];

/// Blackman and Vigna's xoroshiro128+ generator.
///
/// The output `s0 + s1` is taken before the state update. The lowest bits
/// are weaker than the high bits, which is why the float constructors only
/// consume the top of each draw. Period `2^128 - 1`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::{Engine, Xoroshiro128Plus};
///
/// let mut engine = Xoroshiro128Plus::with_state([1, 2]);
/// assert_eq!(engine.next_ulong(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xoroshiro128Plus {
    state: [u64; 2],
}

impl Xoroshiro128Plus {
    /// State used by `Default` and in place of an all-zero seed.
    pub const DEFAULT_STATE: [u64; 2] = [0x9E37_79B9_7F4A_7C15, 0xBF58_476D_1CE4_E5B9];

    #[inline]
    fn next_state(&mut self) -> u64 {
        let [s0, mut s1] = self.state;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.state = [s0.rotate_left(24) ^ s1 ^ (s1 << 16), s1.rotate_left(37)];

        result
    }

    fn apply_jump(&mut self, polynomial: &[u64; 2]) {
        let mut s0 = 0u64;
        let mut s1 = 0u64;
        for &word in polynomial {
            for bit in 0..64 {
                if word & (1u64 << bit) != 0 {
                    s0 ^= self.state[0];
                    s1 ^= self.state[1];
                }
                self.next_state();
            }
        }
        self.state = [s0, s1];
    }

    /// Advances the state by `2^64` steps.
    ///
    /// Calling `jump` `k` times on clones of one engine yields `k`
    /// non-overlapping streams for parallel use.
    pub fn jump(&mut self) {
        self.apply_jump(&JUMP);
    }

    /// Advances the state by `2^96` steps.
    pub fn long_jump(&mut self) {
        self.apply_jump(&LONG_JUMP);
    }
}

impl Default for Xoroshiro128Plus {
    fn default() -> Self {
        Self {
            state: Self::DEFAULT_STATE,
        }
    }
}

impl Engine for Xoroshiro128Plus {
    type State = [u64; 2];
    const NAME: &'static str = "Xoroshiro128Plus";

    #[inline]
    fn state(&self) -> [u64; 2] {
        self.state
    }

    #[inline]
    fn set_state(&mut self, state: [u64; 2]) {
        debug_assert!(
            Self::is_valid_state(&state),
            "Xoroshiro128Plus state must not be all zero"
        );
        self.state = state;
    }

    #[inline]
    fn is_valid_state(state: &[u64; 2]) -> bool {
        state[0] != 0 || state[1] != 0
    }

    #[inline]
    fn with_state(state: [u64; 2]) -> Self {
        debug_assert!(
            Self::is_valid_state(&state),
            "Xoroshiro128Plus state must not be all zero"
        );
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

impl RngCore for Xoroshiro128Plus {
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

impl SeedableRng for Xoroshiro128Plus {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut low = [0u8; 8];
        let mut high = [0u8; 8];
        low.copy_from_slice(&seed[..8]);
        high.copy_from_slice(&seed[8..]);
        let state = [u64::from_le_bytes(low), u64::from_le_bytes(high)];
        if Self::is_valid_state(&state) {
            Self { state }
        } else {
            Self::default()
        }
    }
}
