//! Negative binomial distribution: failures before `successes` successes.
//!
//! Composed from `successes` independent geometric waiting times that share
//! one [`GeometricSetup`].

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use super::geometric::{validate_probability, GeometricSetup};
use crate::provider::GeneratorConfig;

/// Draws one negative binomial variate offset by `start_point`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift64;
/// use sampler_distributions::discrete::negative_binomial::generate;
/// use sampler_distributions::discrete::GeometricSetup;
///
/// let mut engine = XorShift64::default();
/// let setup = GeometricSetup::new(1.0);
/// assert_eq!(generate(&mut engine, &setup, 5, 0), 0);
/// ```
#[inline]
pub fn generate<S: IidSource + ?Sized>(
    source: &mut S,
    setup: &GeometricSetup,
    successes: u32,
    start_point: i32,
) -> i32 {
    debug_assert!(successes > 0, "negative binomial successes must be > 0");
    let mut failures: u32 = 0;
    for _ in 0..successes {
        failures = failures.saturating_add(setup.failures(source));
    }
    start_point.saturating_add_unsigned(failures)
}

/// Parameters of a negative binomial distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NegativeBinomialParams {
    /// Success probability per trial, in `(0, 1]`.
    pub probability: f32,
    /// Successes to wait for, `> 0`.
    pub successes: u32,
    /// Offset added to the failure count.
    pub start_point: i32,
}

impl NegativeBinomialParams {
    /// Creates a parameter set.
    pub fn new(probability: f32, successes: u32, start_point: i32) -> Self {
        Self {
            probability,
            successes,
            start_point,
        }
    }

    /// Checks `probability` in `(0, 1]` and `successes > 0`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_probability(self.probability)?;
        if self.successes == 0 {
            return Err(ParameterError::OutOfRange {
                name: "successes",
                value: 0.0,
                expected: "> 0",
            });
        }
        Ok(())
    }
}

impl Default for NegativeBinomialParams {
    fn default() -> Self {
        Self::new(0.5, 1, 0)
    }
}

/// Negative binomial generator with a cached [`GeometricSetup`].
#[derive(Clone, Debug)]
pub struct NegativeBinomialGenerator<S> {
    source: S,
    setup: GeometricSetup,
    successes: u32,
    start_point: i32,
}

impl<S: IidSource> NegativeBinomialGenerator<S> {
    /// Creates a generator.
    pub fn new(source: S, probability: f32, successes: u32, start_point: i32) -> Self {
        debug_assert!(successes > 0, "negative binomial successes must be > 0");
        Self {
            source,
            setup: GeometricSetup::new(probability),
            successes,
            start_point,
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(
        source: S,
        probability: f32,
        successes: u32,
        start_point: i32,
    ) -> Result<Self, ParameterError> {
        NegativeBinomialParams::new(probability, successes, start_point).validate()?;
        Ok(Self::new(source, probability, successes, start_point))
    }

    /// Returns the parameter set.
    pub fn params(&self) -> NegativeBinomialParams {
        NegativeBinomialParams::new(self.setup.probability(), self.successes, self.start_point)
    }

    /// Sets the success probability, rebuilding the setup if it changed.
    pub fn set_probability(&mut self, probability: f32) {
        if probability != self.setup.probability() {
            self.setup = GeometricSetup::new(probability);
        }
    }

    /// Sets the number of successes to wait for.
    pub fn set_successes(&mut self, successes: u32) {
        debug_assert!(successes > 0, "negative binomial successes must be > 0");
        self.successes = successes;
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
        self.setup = GeometricSetup::new(self.setup.probability());
    }
}

impl<S: IidSource> Generator<i32> for NegativeBinomialGenerator<S> {
    #[inline]
    fn generate(&mut self) -> i32 {
        generate(&mut self.source, &self.setup, self.successes, self.start_point)
    }
}

impl GeneratorConfig for NegativeBinomialParams {
    type Sample = i32;
    type Generator = NegativeBinomialGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        NegativeBinomialParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        NegativeBinomialGenerator::new(engine, self.probability, self.successes, self.start_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampler_core::engines::{XorShift128, Xoroshiro128Plus};
    use sampler_core::iid;

    #[test]
    fn test_single_success_matches_geometric() {
        let setup = GeometricSetup::new(0.3);
        let mut a = XorShift128::default();
        let mut b = XorShift128::default();
        for _ in 0..1_000 {
            assert_eq!(
                generate(&mut a, &setup, 1, 2),
                super::super::geometric::generate(&mut b, &setup, 2)
            );
        }
    }

    #[test]
    fn test_sums_geometric_waiting_times() {
        // Each draw of 0.8 at p = 0.5 contributes two failures.
        let mut source = iid::from_fn(|| 0.8);
        let setup = GeometricSetup::new(0.5);
        assert_eq!(generate(&mut source, &setup, 3, 1), 7);
    }

    #[test]
    fn test_moments() {
        // mean = r (1 - p) / p, variance = r (1 - p) / p^2
        let mut nb = NegativeBinomialGenerator::new(Xoroshiro128Plus::default(), 0.5, 4, 0);
        let n = 100_000;
        let samples: Vec<f64> = (0..n).map(|_| nb.generate() as f64).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 4.0).abs() < 0.05, "mean {}", mean);
        assert!((variance - 8.0).abs() < 0.3, "variance {}", variance);
    }

    #[test]
    fn test_validation() {
        assert!(NegativeBinomialParams::new(0.5, 0, 0).validate().is_err());
        assert!(NegativeBinomialParams::new(0.0, 3, 0).validate().is_err());
        assert!(NegativeBinomialGenerator::try_new(XorShift128::default(), 0.5, 3, 0).is_ok());
    }
}
