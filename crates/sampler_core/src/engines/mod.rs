//! # Uniform Pseudo-Random Engines
//!
//! Small, fixed-state xorshift-family generators that turn an integer state
//! into uniform integers, floats and doubles.
//!
//! ## Engines
//!
//! | Engine | State | Recurrence |
//! |--------|-------|------------|
//! | [`XorShift32`] | `u32` | shifts 13 / 17 / 5 |
//! | [`XorShift64`] | `u64` | shifts 13 / 7 / 17 |
//! | [`XorShift128`] | `[u32; 4]` | Marsaglia xor128 word rotation |
//! | [`Xoroshiro128Plus`] | `[u64; 2]` | rotl 24 / shl 16 / rotl 37 |
//!
//! The recurrences are reproduced bit for bit; they define the output
//! sequence and must not be "improved".
//!
//! ## State Invariant
//!
//! At least one state word must be non-zero. The all-zero state is a fixed
//! point of every recurrence here. Seeding through [`rand::SeedableRng`]
//! replaces an all-zero seed with the engine's default state,
//! [`Engine::from_state`] rejects it, and [`Engine::set_state`] only checks it
//! with `debug_assert!`.
//!
//! ## Thread Safety
//!
//! Engines are plain values with no interior synchronisation. Use one engine
//! per thread; [`streams`] derives decorrelated per-thread engines.
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_core::engines::{Engine, XorShift128};
//!
//! let mut engine = XorShift128::default();
//! let checkpoint = engine.state();
//!
//! let first: Vec<f32> = (0..4).map(|_| engine.next_float()).collect();
//!
//! engine.set_state(checkpoint);
//! let again: Vec<f32> = (0..4).map(|_| engine.next_float()).collect();
//! assert_eq!(first, again);
//! ```

pub mod bits;
pub mod streams;
mod xoroshiro128plus;
mod xorshift128;
mod xorshift32;
mod xorshift64;

pub use xoroshiro128plus::Xoroshiro128Plus;
pub use xorshift128::XorShift128;
pub use xorshift32::XorShift32;
pub use xorshift64::XorShift64;

use crate::types::ParameterError;

/// Engine used when a caller does not supply one.
pub type DefaultEngine = XorShift128;

/// Common interface of the uniform engines.
///
/// Implementors provide the native-width draws, the state accessors and
/// `forward`; everything else is derived from `next_uint`/`next_ulong`.
///
/// # Ranges
///
/// - `next_float` / `next_double`: `[0, 1)`, built from mantissa bits
/// - `next_float_inclusive` / `next_double_inclusive`: `[0, 1]`, built by division
/// - integer ranges: `[min, max)`, built with a widened multiply and shift
pub trait Engine: Clone {
    /// Plain integer state used for checkpoint and restore.
    type State: Copy + PartialEq + core::fmt::Debug;

    /// Engine name used in error messages.
    const NAME: &'static str;

    /// Returns the current state.
    fn state(&self) -> Self::State;

    /// Overwrites the current state.
    ///
    /// The state must contain a non-zero word; this is checked only in
    /// debug builds.
    fn set_state(&mut self, state: Self::State);

    /// Returns true if `state` contains at least one non-zero word.
    fn is_valid_state(state: &Self::State) -> bool;

    /// Constructs an engine directly from a state.
    fn with_state(state: Self::State) -> Self;

    /// Constructs an engine from a state, rejecting the all-zero state.
    ///
    /// # Errors
    ///
    /// Returns `ParameterError::ZeroState` if every word is zero.
    fn from_state(state: Self::State) -> Result<Self, ParameterError> {
        if Self::is_valid_state(&state) {
            Ok(Self::with_state(state))
        } else {
            Err(ParameterError::ZeroState { engine: Self::NAME })
        }
    }

    /// Advances the state and returns 32 random bits.
    fn next_uint(&mut self) -> u32;

    /// Advances the state and returns 64 random bits.
    fn next_ulong(&mut self) -> u64;

    /// Returns a double in `[0, 1)`.
    fn next_double(&mut self) -> f64;

    /// Returns a double in `[0, 1]`.
    fn next_double_inclusive(&mut self) -> f64;

    /// Advances the state `steps` times without producing output.
    fn forward(&mut self, steps: u64);

    /// Returns a float in `[0, 1)`.
    #[inline]
    fn next_float(&mut self) -> f32 {
        bits::unit_f32(self.next_uint())
    }

    /// Returns a float in `[0, 1]`.
    #[inline]
    fn next_float_inclusive(&mut self) -> f32 {
        bits::unit_f32_inclusive(self.next_uint())
    }

    /// Returns a float in `[min, max)`.
    #[inline]
    fn next_float_range(&mut self, min: f32, max: f32) -> f32 {
        (max - min) * self.next_float() + min
    }

    /// Returns a double in `[min, max)`.
    #[inline]
    fn next_double_range(&mut self, min: f64, max: f64) -> f64 {
        (max - min) * self.next_double() + min
    }

    /// Returns an integer in `[min, max)`; `min` when the range is empty.
    #[inline]
    fn next_uint_range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "next_uint_range: min {} > max {}", min, max);
        min + bits::scale_u32(self.next_uint(), max - min)
    }

    /// Returns an integer in `[min, max)`; `min` when the range is empty.
    #[inline]
    fn next_int_range(&mut self, min: i32, max: i32) -> i32 {
        debug_assert!(min <= max, "next_int_range: min {} > max {}", min, max);
        let span = max.wrapping_sub(min) as u32;
        min.wrapping_add(bits::scale_u32(self.next_uint(), span) as i32)
    }

    /// Returns an integer in `[min, max)`; `min` when the range is empty.
    #[inline]
    fn next_ulong_range(&mut self, min: u64, max: u64) -> u64 {
        debug_assert!(min <= max, "next_ulong_range: min {} > max {}", min, max);
        min + bits::scale_u64(self.next_ulong(), max - min)
    }

    /// Returns an integer in `[min, max)`; `min` when the range is empty.
    #[inline]
    fn next_long_range(&mut self, min: i64, max: i64) -> i64 {
        debug_assert!(min <= max, "next_long_range: min {} > max {}", min, max);
        let span = max.wrapping_sub(min) as u64;
        min.wrapping_add(bits::scale_u64(self.next_ulong(), span) as i64)
    }

    /// Fills `buffer` with floats in `[0, 1)`.
    #[inline]
    fn fill_floats(&mut self, buffer: &mut [f32]) {
        for value in buffer.iter_mut() {
            *value = self.next_float();
        }
    }

    /// Fills `buffer` with doubles in `[0, 1)`.
    #[inline]
    fn fill_doubles(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_double();
        }
    }
}

/// Writes little-endian words from `next` into `dest`, truncating the last one.
///
/// Shared by the `rand::RngCore::fill_bytes` implementations.
pub(crate) fn fill_bytes_with<const N: usize>(dest: &mut [u8], mut next: impl FnMut() -> [u8; N]) {
    let mut chunks = dest.chunks_exact_mut(N);
    for chunk in &mut chunks {
        chunk.copy_from_slice(&next());
    }
    let rest = chunks.into_remainder();
    if !rest.is_empty() {
        let bytes = next();
        let len = rest.len();
        rest.copy_from_slice(&bytes[..len]);
    }
}
