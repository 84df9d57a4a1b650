//! Geometric distribution: failures before the first success.
//!
//! Sampled by inversion from one uniform draw:
//! `k = floor(ln(1 - u) / ln(1 - p))`. [`GeometricSetup`] caches the
//! reciprocal of `ln(1 - p)` so the hot path is one log and one multiply.
//! Computed in `f64` so that small `p` does not lose the tail.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

/// Cached constants of a geometric distribution.
///
/// # Examples
///
/// ```rust
/// use sampler_distributions::discrete::GeometricSetup;
///
/// let setup = GeometricSetup::new(0.25);
/// assert_eq!(setup.probability(), 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricSetup {
    probability: f32,
    inverse_log_failure: f64,
}

impl GeometricSetup {
    /// Derives the constants for `probability` in `(0, 1]`.
    pub fn new(probability: f32) -> Self {
        debug_assert!(
            probability > 0.0 && probability <= 1.0,
            "geometric probability must be in (0, 1], got {}",
            probability
        );
        Self {
            probability,
            inverse_log_failure: 1.0 / (-(probability as f64)).ln_1p(),
        }
    }

    /// Validates `probability` before deriving the constants.
    pub fn try_new(probability: f32) -> Result<Self, ParameterError> {
        validate_probability(probability)?;
        Ok(Self::new(probability))
    }

    /// The probability the setup was built from.
    #[inline]
    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// Number of failures before the next success.
    #[inline]
    pub(crate) fn failures<S: IidSource + ?Sized>(&self, source: &mut S) -> u32 {
        if self.probability >= 1.0 {
            return 0;
        }
        let u = source.next_iid() as f64;
        let k = ((-u).ln_1p() * self.inverse_log_failure).floor();
        // Saturating float-to-int cast.
        k as u32
    }
}

pub(crate) fn validate_probability(probability: f32) -> Result<(), ParameterError> {
    ParameterError::ensure_finite("probability", probability as f64)?;
    if probability > 0.0 && probability <= 1.0 {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name: "probability",
            value: probability as f64,
            expected: "in (0, 1]",
        })
    }
}

/// Draws one geometric variate offset by `start_point`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift64;
/// use sampler_distributions::discrete::geometric::{generate, GeometricSetup};
///
/// let mut engine = XorShift64::default();
/// let setup = GeometricSetup::new(1.0);
/// assert_eq!(generate(&mut engine, &setup, 3), 3);
/// ```
#[inline]
pub fn generate<S: IidSource + ?Sized>(
    source: &mut S,
    setup: &GeometricSetup,
    start_point: i32,
) -> i32 {
    start_point.saturating_add_unsigned(setup.failures(source))
}

/// Parameters of a geometric distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeometricParams {
    /// Success probability per trial, in `(0, 1]`.
    pub probability: f32,
    /// Offset added to the failure count.
    pub start_point: i32,
}

impl GeometricParams {
    /// Creates a parameter set.
    pub fn new(probability: f32, start_point: i32) -> Self {
        Self {
            probability,
            start_point,
        }
    }

    /// Checks that `probability` lies in `(0, 1]`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_probability(self.probability)
    }
}

impl Default for GeometricParams {
    fn default() -> Self {
        Self::new(0.5, 0)
    }
}

/// Geometric generator with a cached [`GeometricSetup`].
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::discrete::GeometricGenerator;
///
/// // Mean failures = (1 - p) / p = 3
/// let mut geometric = GeometricGenerator::new(XorShift128::default(), 0.25, 0);
/// let n = 50_000;
/// let mean = (0..n).map(|_| geometric.generate() as f64).sum::<f64>() / n as f64;
/// assert!((mean - 3.0).abs() < 0.1);
/// ```
#[derive(Clone, Debug)]
pub struct GeometricGenerator<S> {
    source: S,
    setup: GeometricSetup,
    start_point: i32,
}

impl<S: IidSource> GeometricGenerator<S> {
    /// Creates a generator.
    pub fn new(source: S, probability: f32, start_point: i32) -> Self {
        Self {
            source,
            setup: GeometricSetup::new(probability),
            start_point,
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(source: S, probability: f32, start_point: i32) -> Result<Self, ParameterError> {
        validate_probability(probability)?;
        Ok(Self::new(source, probability, start_point))
    }

    /// Returns the parameter set.
    pub fn params(&self) -> GeometricParams {
        GeometricParams::new(self.setup.probability, self.start_point)
    }

    /// Sets the success probability, rebuilding the setup if it changed.
    pub fn set_probability(&mut self, probability: f32) {
        if probability != self.setup.probability {
            self.setup = GeometricSetup::new(probability);
        }
    }

    /// Sets the offset.
    pub fn set_start_point(&mut self, start_point: i32) {
        self.start_point = start_point;
    }

    /// Replaces the source and returns the old one.
    pub fn set_source(&mut self, source: S) -> S {
        std::mem::replace(&mut self.source, source)
    }

    /// Returns the source mutably.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Rebuilds the setup from the stored probability.
    pub fn invalidate(&mut self) {
        self.setup = GeometricSetup::new(self.setup.probability);
    }
}

impl<S: IidSource> Generator<i32> for GeometricGenerator<S> {
    #[inline]
    fn generate(&mut self) -> i32 {
        generate(&mut self.source, &self.setup, self.start_point)
    }
}

impl GeneratorConfig for GeometricParams {
    type Sample = i32;
    type Generator = GeometricGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        GeometricParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        GeometricGenerator::new(engine, self.probability, self.start_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampler_core::engines::XorShift128;
    use sampler_core::iid;

    #[test]
    fn test_certain_success_has_no_failures() {
        let mut geometric = GeometricGenerator::new(XorShift128::default(), 1.0, 4);
        for _ in 0..100 {
            assert_eq!(geometric.generate(), 4);
        }
    }

    #[test]
    fn test_zero_draw_maps_to_zero_failures() {
        let mut source = iid::from_fn(|| 0.0);
        let setup = GeometricSetup::new(0.5);
        assert_eq!(generate(&mut source, &setup, 0), 0);
    }

    #[test]
    fn test_inversion_thresholds() {
        // p = 0.5: k = floor(log2(1 / (1 - u)))
        let setup = GeometricSetup::new(0.5);
        let mut below_half = iid::from_fn(|| 0.49);
        let mut three_quarters = iid::from_fn(|| 0.8);
        assert_eq!(generate(&mut below_half, &setup, 0), 0);
        assert_eq!(generate(&mut three_quarters, &setup, 0), 2);
    }

    #[test]
    fn test_start_point_offsets_after_generation() {
        let setup = GeometricSetup::new(0.5);
        let mut source = iid::from_fn(|| 0.8);
        assert_eq!(generate(&mut source, &setup, -10), -8);
    }

    #[test]
    fn test_pmf_of_small_counts() {
        // P(K = k) = (1 - p)^k p
        let p = 0.4_f64;
        let mut geometric = GeometricGenerator::new(XorShift128::default(), 0.4, 0);
        let n = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..n {
            let k = geometric.generate() as usize;
            if k < counts.len() {
                counts[k] += 1;
            }
        }
        for (k, &count) in counts.iter().enumerate() {
            let expected = (1.0 - p).powi(k as i32) * p;
            let observed = count as f64 / n as f64;
            assert!((observed - expected).abs() < 0.01, "k={} observed {} expected {}", k, observed, expected);
        }
    }

    #[test]
    fn test_validation() {
        assert!(GeometricSetup::try_new(0.0).is_err());
        assert!(GeometricSetup::try_new(1.5).is_err());
        assert!(GeometricSetup::try_new(f32::NAN).is_err());
        assert!(GeometricGenerator::try_new(XorShift128::default(), 1.0, 0).is_ok());
    }
}
