//! Poisson distribution via Knuth's product method.
//!
//! ## Algorithm
//!
//! Knuth multiplies uniforms until the product drops below `e^-λ`. For large
//! `λ` that threshold underflows, so the product is instead renormalised by
//! `e^STEP` whenever it falls below one, spending `λ` in chunks of
//! [`POISSON_STEP`]. [`PoissonSetup`] caches the number of whole chunks and
//! the factors `e^STEP` and `e^remainder`.
//!
//! Work per draw is proportional to `λ`.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

/// Chunk of `λ` spent per renormalisation.
pub const POISSON_STEP: f64 = 500.0;

/// Largest accepted rate; draws are reported as `i32`.
pub const POISSON_MAX_LAMBDA: f64 = i32::MAX as f64;

/// Cached chunking of `λ`.
///
/// # Examples
///
/// ```rust
/// use sampler_distributions::discrete::PoissonSetup;
///
/// let setup = PoissonSetup::new(1_200.0);
/// assert_eq!(setup.whole_steps(), 2);
/// assert!((setup.remainder() - 200.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonSetup {
    lambda: f64,
    whole_steps: u32,
    remainder: f64,
    exp_step: f64,
    exp_remainder: f64,
}

impl PoissonSetup {
    /// Splits `lambda` in `[0, POISSON_MAX_LAMBDA]` into whole steps and a
    /// remainder in `(0, STEP]`.
    pub fn new(lambda: f64) -> Self {
        debug_assert!(
            (0.0..=POISSON_MAX_LAMBDA).contains(&lambda),
            "poisson lambda must be in [0, {}], got {}",
            POISSON_MAX_LAMBDA,
            lambda
        );
        let whole_steps = if lambda > POISSON_STEP {
            ((lambda / POISSON_STEP).ceil() - 1.0) as u32
        } else {
            0
        };
        let remainder = lambda - whole_steps as f64 * POISSON_STEP;
        Self {
            lambda,
            whole_steps,
            remainder,
            exp_step: POISSON_STEP.exp(),
            exp_remainder: remainder.exp(),
        }
    }

    /// Validates `lambda` before building the setup.
    pub fn try_new(lambda: f64) -> Result<Self, ParameterError> {
        validate_lambda(lambda)?;
        Ok(Self::new(lambda))
    }

    /// The rate the setup was built from.
    #[inline]
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Number of full [`POISSON_STEP`] chunks.
    #[inline]
    pub fn whole_steps(&self) -> u32 {
        self.whole_steps
    }

    /// Rate left after the whole chunks.
    #[inline]
    pub fn remainder(&self) -> f64 {
        self.remainder
    }
}

fn validate_lambda(lambda: f64) -> Result<(), ParameterError> {
    ParameterError::ensure_finite("lambda", lambda)?;
    if !(0.0..=POISSON_MAX_LAMBDA).contains(&lambda) {
        return Err(ParameterError::OutOfRange {
            name: "lambda",
            value: lambda,
            expected: "in [0, 2^31 - 1]",
        });
    }
    Ok(())
}

/// Draws one Poisson variate offset by `start_point`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_distributions::discrete::poisson::{generate, PoissonSetup};
///
/// let mut engine = XorShift128::default();
/// let setup = PoissonSetup::new(0.0);
/// assert_eq!(generate(&mut engine, &setup, 2), 2);
/// ```
pub fn generate<S: IidSource + ?Sized>(
    source: &mut S,
    setup: &PoissonSetup,
    start_point: i32,
) -> i32 {
    let mut count: u32 = 0;
    let mut product = 1.0_f64;
    let mut steps_left = setup.whole_steps;
    let mut remainder_pending = setup.remainder > 0.0;

    loop {
        product *= source.next_iid() as f64;
        while product < 1.0 && (steps_left > 0 || remainder_pending) {
            if steps_left > 0 {
                product *= setup.exp_step;
                steps_left -= 1;
            } else {
                product *= setup.exp_remainder;
                remainder_pending = false;
            }
        }
        if product <= 1.0 {
            break;
        }
        count = count.saturating_add(1);
    }

    start_point.saturating_add_unsigned(count)
}

/// Parameters of a Poisson distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoissonParams {
    /// Rate, in `[0, POISSON_MAX_LAMBDA]`.
    pub lambda: f64,
    /// Offset added to the event count.
    pub start_point: i32,
}

impl PoissonParams {
    /// Creates a parameter set.
    pub fn new(lambda: f64, start_point: i32) -> Self {
        Self {
            lambda,
            start_point,
        }
    }

    /// Checks that `lambda` is finite and within `[0, POISSON_MAX_LAMBDA]`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_lambda(self.lambda)
    }
}

impl Default for PoissonParams {
    fn default() -> Self {
        Self::new(1.0, 0)
    }
}

/// Poisson generator with a cached [`PoissonSetup`].
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::discrete::PoissonGenerator;
///
/// let mut poisson = PoissonGenerator::new(XorShift128::default(), 4.0, 0);
/// let n = 50_000;
/// let mean = (0..n).map(|_| poisson.generate() as f64).sum::<f64>() / n as f64;
/// assert!((mean - 4.0).abs() < 0.05);
/// ```
#[derive(Clone, Debug)]
pub struct PoissonGenerator<S> {
    source: S,
    setup: PoissonSetup,
    start_point: i32,
}

impl<S: IidSource> PoissonGenerator<S> {
    /// Creates a generator.
    pub fn new(source: S, lambda: f64, start_point: i32) -> Self {
        Self {
            source,
            setup: PoissonSetup::new(lambda),
            start_point,
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(source: S, lambda: f64, start_point: i32) -> Result<Self, ParameterError> {
        validate_lambda(lambda)?;
        Ok(Self::new(source, lambda, start_point))
    }

    /// Returns the parameter set.
    pub fn params(&self) -> PoissonParams {
        PoissonParams::new(self.setup.lambda, self.start_point)
    }

    /// Sets the rate, rebuilding the setup if it changed.
    pub fn set_lambda(&mut self, lambda: f64) {
        if lambda != self.setup.lambda {
            self.setup = PoissonSetup::new(lambda);
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

    /// Rebuilds the setup from the stored rate.
    pub fn invalidate(&mut self) {
        self.setup = PoissonSetup::new(self.setup.lambda);
    }
}

impl<S: IidSource> Generator<i32> for PoissonGenerator<S> {
    #[inline]
    fn generate(&mut self) -> i32 {
        generate(&mut self.source, &self.setup, self.start_point)
    }
}

impl GeneratorConfig for PoissonParams {
    type Sample = i32;
    type Generator = PoissonGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        PoissonParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        PoissonGenerator::new(engine, self.lambda, self.start_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampler_core::engines::{XorShift128, Xoroshiro128Plus};
    use sampler_core::iid;

    fn moments<G: Generator<i32>>(generator: &mut G, n: usize) -> (f64, f64) {
        let samples: Vec<f64> = (0..n).map(|_| generator.generate() as f64).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, variance)
    }

    #[test]
    fn test_setup_chunking() {
        let small = PoissonSetup::new(3.0);
        assert_eq!(small.whole_steps(), 0);
        assert_eq!(small.remainder(), 3.0);

        let exact = PoissonSetup::new(1_000.0);
        assert_eq!(exact.whole_steps(), 1);
        assert_eq!(exact.remainder(), 500.0);

        let zero = PoissonSetup::new(0.0);
        assert_eq!(zero.whole_steps(), 0);
        assert_eq!(zero.remainder(), 0.0);
    }

    #[test]
    fn test_zero_rate_returns_start_point() {
        let mut poisson = PoissonGenerator::new(XorShift128::default(), 0.0, -4);
        for _ in 0..100 {
            assert_eq!(poisson.generate(), -4);
        }
    }

    #[test]
    fn test_knuth_product_with_scripted_source() {
        // lambda = ln 4: threshold e^-lambda = 0.25; 0.5 * 0.6 = 0.3 > 0.25,
        // then * 0.5 = 0.15 stops, giving 2 events.
        let setup = PoissonSetup::new(4.0_f64.ln());
        let mut values = vec![0.5_f32, 0.6, 0.5].into_iter().rev();
        let mut source = iid::from_fn(move || values.next().unwrap());
        assert_eq!(generate(&mut source, &setup, 0), 2);
    }

    #[test]
    fn test_small_rate_moments() {
        let mut poisson = PoissonGenerator::new(XorShift128::default(), 2.5, 0);
        let (mean, variance) = moments(&mut poisson, 100_000);
        assert!((mean - 2.5).abs() < 0.03, "mean {}", mean);
        assert!((variance - 2.5).abs() < 0.08, "variance {}", variance);
    }

    #[test]
    fn test_large_rate_does_not_underflow() {
        // e^-1200 underflows f64; chunking keeps the product representable.
        let mut poisson = PoissonGenerator::new(Xoroshiro128Plus::default(), 1_200.0, 0);
        let (mean, _) = moments(&mut poisson, 2_000);
        assert!((mean - 1_200.0).abs() < 5.0, "mean {}", mean);
    }

    #[test]
    fn test_largest_rate_chunks_exactly() {
        let setup = PoissonSetup::new(POISSON_MAX_LAMBDA);
        let covered = setup.whole_steps() as f64 * POISSON_STEP + setup.remainder();
        assert_eq!(covered, POISSON_MAX_LAMBDA);
        assert!(setup.remainder() > 0.0 && setup.remainder() <= POISSON_STEP);
        assert!(setup.exp_remainder.is_finite());
    }

    #[test]
    fn test_set_lambda_rebuilds_setup() {
        let mut poisson = PoissonGenerator::new(XorShift128::default(), 1.0, 0);
        poisson.set_lambda(0.0);
        assert_eq!(poisson.generate(), 0);
        assert_eq!(poisson.params().lambda, 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(PoissonSetup::try_new(-1.0).is_err());
        assert!(PoissonSetup::try_new(f64::INFINITY).is_err());
        assert!(PoissonSetup::try_new(POISSON_MAX_LAMBDA).is_ok());
        assert!(PoissonSetup::try_new(3.0e12).is_err());
        assert!(PoissonParams::new(POISSON_MAX_LAMBDA * 2.0, 0).validate().is_err());
        assert!(PoissonGenerator::try_new(XorShift128::default(), 3.0, 0).is_ok());
    }
}
