//! # IID Source Capability
//!
//! An [`IidSource`] is anything that can be called repeatedly to produce an
//! independent uniform `f32`. Every distribution algorithm is written once,
//! generic over this trait, and accepts any of the interchangeable shapes:
//!
//! - a raw engine (`XorShift128`, ...), drawing `[0, 1)` via `next_float`
//! - a closure wrapped with [`from_fn`]
//! - a `Generator<f32>` object wrapped with [`from_generator`]
//!
//! plus two adapters: [`Inclusive`] (engine draws in `[0, 1]`) and
//! [`RandSource`] (any `rand::RngCore`).
//!
//! ## Preconditions
//!
//! Algorithms assume values lie in `[0, 1)` unless their documentation says
//! otherwise. A source that returns values outside that range (for example a
//! caller-supplied closure) produces unspecified samples; nothing here clamps
//! or checks.
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_core::engines::XorShift32;
//! use sampler_core::iid::{self, IidSource};
//!
//! fn mean_of<S: IidSource>(source: &mut S, n: usize) -> f32 {
//!     (0..n).map(|_| source.next_iid()).sum::<f32>() / n as f32
//! }
//!
//! let mut engine = XorShift32::default();
//! let mut halves = iid::from_fn(|| 0.5);
//!
//! assert!(mean_of(&mut engine, 10_000) > 0.4);
//! assert_eq!(mean_of(&mut halves, 10), 0.5);
//! ```

use rand::{Rng, RngCore};

use crate::engines::{Engine, XorShift128, XorShift32, XorShift64, Xoroshiro128Plus};
use crate::traits::Generator;

/// Produces a uniform `f32` on every call.
pub trait IidSource {
    /// Draws the next value, in `[0, 1)` unless the source documents `[0, 1]`.
    fn next_iid(&mut self) -> f32;
}

impl<S: IidSource + ?Sized> IidSource for &mut S {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        (**self).next_iid()
    }
}

impl<S: IidSource + ?Sized> IidSource for Box<S> {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        (**self).next_iid()
    }
}

macro_rules! impl_engine_source {
    ($($engine:ty),* $(,)?) => {
        $(
            impl IidSource for $engine {
                #[inline]
                fn next_iid(&mut self) -> f32 {
                    self.next_float()
                }
            }
        )*
    };
}

impl_engine_source!(XorShift32, XorShift64, XorShift128, Xoroshiro128Plus);

/// Closure-backed source created by [`from_fn`].
#[derive(Clone, Debug)]
pub struct FromFn<F>(F);

/// Wraps a parameterless closure as an [`IidSource`].
#[inline]
pub fn from_fn<F: FnMut() -> f32>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: FnMut() -> f32> IidSource for FromFn<F> {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        (self.0)()
    }
}

/// Generator-backed source created by [`from_generator`].
#[derive(Clone, Debug)]
pub struct FromGenerator<G>(G);

/// Wraps a uniform `Generator<f32>` as an [`IidSource`].
#[inline]
pub fn from_generator<G: Generator<f32>>(generator: G) -> FromGenerator<G> {
    FromGenerator(generator)
}

impl<G> FromGenerator<G> {
    /// Returns the wrapped generator.
    pub fn into_inner(self) -> G {
        self.0
    }

    /// Returns a mutable reference to the wrapped generator.
    pub fn get_mut(&mut self) -> &mut G {
        &mut self.0
    }
}

impl<G: Generator<f32>> IidSource for FromGenerator<G> {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        self.0.generate()
    }
}

/// Engine adapter drawing from the closed interval `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inclusive<E>(pub E);

impl<E: Engine> IidSource for Inclusive<E> {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        self.0.next_float_inclusive()
    }
}

/// Adapter drawing `[0, 1)` floats from any `rand` generator.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use sampler_core::iid::{IidSource, RandSource};
///
/// let mut source = RandSource(StdRng::seed_from_u64(42));
/// let u = source.next_iid();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Clone, Debug)]
pub struct RandSource<R>(pub R);

impl<R: RngCore> IidSource for RandSource<R> {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::generator;

    fn draw<S: IidSource>(mut source: S, n: usize) -> Vec<f32> {
        (0..n).map(|_| source.next_iid()).collect()
    }

    #[test]
    fn test_engine_source_matches_next_float() {
        let mut engine = XorShift64::default();
        let expected: Vec<f32> = (0..10).map(|_| engine.next_float()).collect();
        assert_eq!(draw(XorShift64::default(), 10), expected);
    }

    #[test]
    fn test_three_shapes_interchangeable() {
        let mut shared = XorShift128::default();
        let expected = draw(&mut shared, 5);

        let mut closure_engine = XorShift128::default();
        let from_closure = draw(from_fn(move || closure_engine.next_float()), 5);

        let mut generator_engine = XorShift128::default();
        let from_gen = draw(
            from_generator(generator::from_fn(move || generator_engine.next_float())),
            5,
        );

        assert_eq!(expected, from_closure);
        assert_eq!(expected, from_gen);
    }

    #[test]
    fn test_borrowed_source_advances_owner() {
        let mut engine = XorShift32::default();
        let _ = draw(&mut engine, 3);
        let mut reference = XorShift32::default();
        reference.forward(3);
        assert_eq!(engine, reference);
    }

    #[test]
    fn test_boxed_dyn_source() {
        let mut boxed: Box<dyn IidSource> = Box::new(XorShift32::default());
        let v = boxed.next_iid();
        assert!((0.0..1.0).contains(&v));
    }

    #[test]
    fn test_inclusive_adapter_range() {
        let mut source = Inclusive(Xoroshiro128Plus::with_state([u64::MAX - 1, 1]));
        assert_eq!(source.next_iid(), 1.0);
        for _ in 0..10_000 {
            assert!((0.0..=1.0).contains(&source.next_iid()));
        }
    }

    #[test]
    fn test_rand_source_with_engine() {
        let mut source = RandSource(XorShift64::default());
        for _ in 0..1_000 {
            assert!((0.0..1.0).contains(&source.next_iid()));
        }
    }
}
