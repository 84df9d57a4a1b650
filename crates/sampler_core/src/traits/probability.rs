//! Acceptance probability functions for envelope sampling.

use crate::math::ProbabilityCurve;

/// Maps a candidate value to an acceptance probability in `[0, 1]`.
///
/// Used as the envelope of acceptance-rejection sampling. A valid envelope
/// attains probability 1 somewhere in the candidate domain; a function that
/// is zero everywhere makes rejection loops spin forever.
///
/// # Examples
///
/// ```rust
/// use sampler_core::traits::ProbabilityFunction;
///
/// let triangle = |x: f32| 1.0 - (2.0 * x - 1.0).abs();
/// assert_eq!(triangle.probability(0.5), 1.0);
/// assert_eq!(triangle.probability(0.0), 0.0);
/// ```
pub trait ProbabilityFunction {
    /// Returns the acceptance probability of `value`.
    fn probability(&self, value: f32) -> f32;
}

impl<F: Fn(f32) -> f32> ProbabilityFunction for F {
    #[inline]
    fn probability(&self, value: f32) -> f32 {
        self(value)
    }
}

impl ProbabilityFunction for ProbabilityCurve {
    #[inline]
    fn probability(&self, value: f32) -> f32 {
        self.evaluate(value)
    }
}
