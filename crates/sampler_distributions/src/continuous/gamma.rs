//! Gamma distribution via the Marsaglia–Tsang method.
//!
//! ## Algorithm
//!
//! For shape `alpha >= 1` with `d = alpha - 1/3` and `c = 1 / sqrt(9d)`:
//!
//! 1. Draw a standard normal `x` until `v = 1 + c·x` is positive
//! 2. Set `v = v³` and draw `u`
//! 3. Accept `d·v` if `u < 1 - 0.0331·x⁴` (squeeze) or
//!    `ln(u) < x²/2 + d·(1 - v + ln(v))`
//!
//! Shapes below one sample at `alpha + 1` and multiply the result by
//! `u'^(1/alpha)`. The result is finally scaled by `beta`.
//!
//! [`GammaSetup`] holds the shape-dependent constants so they are derived
//! once per parameter change rather than once per draw.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use super::normal::{standard_normal, SpareNormal, NORMAL_EPSILON};
use crate::provider::GeneratorConfig;

/// Coefficient of the quartic squeeze test.
pub const GAMMA_SQUEEZE: f32 = 0.0331;

/// Shape-dependent constants of the Marsaglia–Tsang sampler.
///
/// # Examples
///
/// ```rust
/// use sampler_distributions::continuous::GammaSetup;
///
/// let setup = GammaSetup::new(0.5);
/// assert!(setup.is_boosted());
/// assert_eq!(setup.shape(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GammaSetup {
    shape: f32,
    d: f32,
    c: f32,
    boosted: bool,
    inverse_shape: f32,
}

impl GammaSetup {
    /// Derives the constants for `shape > 0`.
    pub fn new(shape: f32) -> Self {
        debug_assert!(shape > 0.0 && shape.is_finite(), "gamma shape must be > 0, got {}", shape);
        let boosted = shape < 1.0;
        let effective = if boosted { shape + 1.0 } else { shape };
        let d = effective - 1.0 / 3.0;
        let c = 1.0 / (9.0 * d).sqrt();
        Self {
            shape,
            d,
            c,
            boosted,
            inverse_shape: 1.0 / shape,
        }
    }

    /// Validates `shape` before deriving the constants.
    pub fn try_new(shape: f32) -> Result<Self, ParameterError> {
        ParameterError::ensure_positive("alpha", shape as f64)?;
        Ok(Self::new(shape))
    }

    /// The shape the setup was derived from.
    #[inline]
    pub fn shape(&self) -> f32 {
        self.shape
    }

    /// `alpha - 1/3` for the (possibly boosted) shape.
    #[inline]
    pub fn d(&self) -> f32 {
        self.d
    }

    /// `1 / sqrt(9d)`.
    #[inline]
    pub fn c(&self) -> f32 {
        self.c
    }

    /// True when `shape < 1` and results are boosted by `u^(1/shape)`.
    #[inline]
    pub fn is_boosted(&self) -> bool {
        self.boosted
    }
}

#[inline]
fn sample_with<S, N>(source: &mut S, setup: &GammaSetup, beta: f32, mut normal: N) -> f32
where
    S: IidSource + ?Sized,
    N: FnMut(&mut S) -> f32,
{
    let (d, c) = (setup.d, setup.c);
    let mut result = loop {
        let (x, v) = loop {
            let x = normal(source);
            let v = 1.0 + c * x;
            if v > NORMAL_EPSILON {
                break (x, v);
            }
        };
        let v = v * v * v;
        let u = source.next_iid();
        let x2 = x * x;
        if u < 1.0 - GAMMA_SQUEEZE * x2 * x2 {
            break d * v;
        }
        if u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            break d * v;
        }
    };

    if setup.boosted {
        let u = loop {
            let u = source.next_iid();
            if u > NORMAL_EPSILON {
                break u;
            }
        };
        result *= u.powf(setup.inverse_shape);
    }

    result * beta
}

/// Draws one gamma variate with the shape cached in `setup` and scale `beta`.
///
/// One-shot form: normal deviates are drawn fresh and their spares discarded.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift64;
/// use sampler_distributions::continuous::gamma::{generate, GammaSetup};
///
/// let mut engine = XorShift64::default();
/// let setup = GammaSetup::new(2.0);
/// assert!(generate(&mut engine, &setup, 3.0) > 0.0);
/// ```
#[inline]
pub fn generate<S: IidSource + ?Sized>(source: &mut S, setup: &GammaSetup, beta: f32) -> f32 {
    sample_with(source, setup, beta, |s| standard_normal(s))
}

/// Parameters of a gamma distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GammaParams {
    /// Shape, `> 0`.
    pub alpha: f32,
    /// Scale, `> 0`.
    pub beta: f32,
}

impl GammaParams {
    /// Creates a parameter set.
    pub fn new(alpha: f32, beta: f32) -> Self {
        Self { alpha, beta }
    }

    /// Checks that both values are finite and strictly positive.
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::ensure_positive("alpha", self.alpha as f64)?;
        ParameterError::ensure_positive("beta", self.beta as f64)
    }
}

impl Default for GammaParams {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Gamma generator with a cached [`GammaSetup`] and spare normal deviate.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::continuous::GammaGenerator;
///
/// let mut gamma = GammaGenerator::new(XorShift128::default(), 3.0, 2.0);
/// let n = 50_000;
/// let mean = (0..n).map(|_| gamma.generate() as f64).sum::<f64>() / n as f64;
/// assert!((mean - 6.0).abs() < 0.1);
/// ```
#[derive(Clone, Debug)]
pub struct GammaGenerator<S> {
    source: S,
    setup: GammaSetup,
    beta: f32,
    normals: SpareNormal,
}

impl<S: IidSource> GammaGenerator<S> {
    /// Creates a generator with shape `alpha` and scale `beta`.
    pub fn new(source: S, alpha: f32, beta: f32) -> Self {
        debug_assert!(beta > 0.0, "gamma beta must be > 0, got {}", beta);
        Self {
            source,
            setup: GammaSetup::new(alpha),
            beta,
            normals: SpareNormal::new(),
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(source: S, alpha: f32, beta: f32) -> Result<Self, ParameterError> {
        GammaParams::new(alpha, beta).validate()?;
        Ok(Self::new(source, alpha, beta))
    }

    /// Returns the shape.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.setup.shape
    }

    /// Returns the scale.
    #[inline]
    pub fn beta(&self) -> f32 {
        self.beta
    }

    /// Returns the cached setup.
    #[inline]
    pub fn setup(&self) -> &GammaSetup {
        &self.setup
    }

    /// Sets the shape, rebuilding the setup if it changed.
    pub fn set_alpha(&mut self, alpha: f32) {
        if alpha != self.setup.shape {
            self.setup = GammaSetup::new(alpha);
        }
    }

    /// Sets the scale.
    pub fn set_beta(&mut self, beta: f32) {
        debug_assert!(beta > 0.0, "gamma beta must be > 0, got {}", beta);
        self.beta = beta;
    }

    /// Replaces the source, discarding the spare normal, and returns the old one.
    pub fn set_source(&mut self, source: S) -> S {
        self.normals.clear();
        std::mem::replace(&mut self.source, source)
    }

    /// Returns the source mutably.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Rebuilds the setup and discards the spare normal.
    pub fn invalidate(&mut self) {
        self.setup = GammaSetup::new(self.setup.shape);
        self.normals.clear();
    }
}

impl<S: IidSource> Generator<f32> for GammaGenerator<S> {
    #[inline]
    fn generate(&mut self) -> f32 {
        let normals = &mut self.normals;
        sample_with(&mut self.source, &self.setup, self.beta, |s| normals.next(s))
    }
}

impl GeneratorConfig for GammaParams {
    type Sample = f32;
    type Generator = GammaGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        GammaParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        GammaGenerator::new(engine, self.alpha, self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sampler_core::engines::{XorShift128, Xoroshiro128Plus};
    use sampler_core::iid;

    fn moments<G: Generator<f32>>(generator: &mut G, n: usize) -> (f64, f64) {
        let samples: Vec<f64> = (0..n).map(|_| generator.generate() as f64).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        (mean, variance)
    }

    #[test]
    fn test_setup_constants() {
        let setup = GammaSetup::new(2.0);
        assert!(!setup.is_boosted());
        assert_relative_eq!(setup.d(), 2.0 - 1.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(setup.c(), 1.0 / (9.0 * setup.d()).sqrt(), epsilon = 1e-6);

        let boosted = GammaSetup::new(0.25);
        assert!(boosted.is_boosted());
        assert_relative_eq!(boosted.d(), 1.25 - 1.0 / 3.0, epsilon = 1e-6);
        assert_eq!(boosted.shape(), 0.25);
    }

    #[test]
    fn test_try_new_rejects_non_positive() {
        assert!(GammaSetup::try_new(0.0).is_err());
        assert!(GammaSetup::try_new(-1.0).is_err());
        assert!(GammaGenerator::try_new(XorShift128::default(), 1.0, 0.0).is_err());
        assert!(GammaGenerator::try_new(XorShift128::default(), 1.0, 1.0).is_ok());
    }

    #[test]
    fn test_squeeze_acceptance_with_scripted_source() {
        // Normal pair from (0.5, 0.75) gives x = 0, so v = 1 and u = 0.5
        // passes the squeeze: result is d * beta.
        let mut values = vec![0.5, 0.5, 0.75, 0.5].into_iter().rev();
        let mut source = iid::from_fn(move || values.next().unwrap());
        let setup = GammaSetup::new(2.0);
        let x = generate(&mut source, &setup, 3.0);
        assert_relative_eq!(x, setup.d() * 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_unit_shape_and_scale_moments() {
        let mut gamma = GammaGenerator::new(XorShift128::default(), 1.0, 1.0);
        let (mean, variance) = moments(&mut gamma, 200_000);
        assert!((mean - 1.0).abs() < 0.02, "mean {}", mean);
        assert!((variance - 1.0).abs() < 0.05, "variance {}", variance);
    }

    #[test]
    fn test_boosted_shape_moments() {
        let mut gamma = GammaGenerator::new(Xoroshiro128Plus::default(), 0.5, 2.0);
        let (mean, variance) = moments(&mut gamma, 200_000);
        // mean = alpha * beta, variance = alpha * beta^2
        assert!((mean - 1.0).abs() < 0.03, "mean {}", mean);
        assert!((variance - 2.0).abs() < 0.1, "variance {}", variance);
    }

    #[test]
    fn test_outputs_positive() {
        let mut gamma = GammaGenerator::new(XorShift128::default(), 0.1, 1.0);
        for _ in 0..10_000 {
            assert!(gamma.generate() >= 0.0);
        }
    }

    #[test]
    fn test_set_alpha_rebuilds_setup() {
        let mut gamma = GammaGenerator::new(XorShift128::default(), 4.0, 1.0);
        let before = *gamma.setup();
        gamma.set_alpha(4.0);
        assert_eq!(*gamma.setup(), before);
        gamma.set_alpha(0.5);
        assert!(gamma.setup().is_boosted());
        assert_eq!(gamma.alpha(), 0.5);
    }

    #[test]
    fn test_invalidate_restores_replay() {
        let mut gamma = GammaGenerator::new(XorShift128::default(), 2.0, 1.0);
        let first: Vec<f32> = (0..5).map(|_| gamma.generate()).collect();

        *gamma.source_mut() = XorShift128::default();
        gamma.invalidate();
        let replay: Vec<f32> = (0..5).map(|_| gamma.generate()).collect();
        assert_eq!(first, replay);
    }
}
