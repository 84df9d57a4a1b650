//! Normal distribution via the Marsaglia polar method.
//!
//! Each successful iteration of the rejection loop yields two independent
//! standard normal deviates. [`SpareNormal`] keeps the second one so the
//! next draw costs no uniforms; [`NormalGenerator`] clears it whenever its
//! mean, deviation or source changes.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

/// Lower bound on `s = u² + v²` in the polar loop, and the margin used by
/// the gamma sampler to keep `1 + c·x` and its boosting draw away from zero.
pub const NORMAL_EPSILON: f32 = 1e-6;

/// Draws one pair of independent standard normal deviates.
///
/// Draws `u, v` uniformly from `(-1, 1)` until `NORMAL_EPSILON < s < 1` with
/// `s = u² + v²`, then scales both by `sqrt(-2 ln(s) / s)`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_distributions::continuous::normal::marsaglia_pair;
///
/// let mut engine = XorShift128::default();
/// let (a, b) = marsaglia_pair(&mut engine);
/// assert!(a.is_finite() && b.is_finite());
/// ```
#[inline]
pub fn marsaglia_pair<S: IidSource + ?Sized>(source: &mut S) -> (f32, f32) {
    loop {
        let u = 2.0 * source.next_iid() - 1.0;
        let v = 2.0 * source.next_iid() - 1.0;
        let s = u * u + v * v;
        if s < 1.0 && s > NORMAL_EPSILON {
            let factor = (-2.0 * s.ln() / s).sqrt();
            return (u * factor, v * factor);
        }
    }
}

/// Draws one standard normal deviate, discarding the spare.
#[inline]
pub fn standard_normal<S: IidSource + ?Sized>(source: &mut S) -> f32 {
    marsaglia_pair(source).0
}

/// Draws one normal deviate with the given mean and deviation.
///
/// One-shot form: the second deviate of the pair is discarded. Use
/// [`NormalGenerator`] to keep it.
#[inline]
pub fn generate<S: IidSource + ?Sized>(source: &mut S, mean: f32, deviation: f32) -> f32 {
    standard_normal(source) * deviation + mean
}

/// Cache for the unconsumed second deviate of a Marsaglia pair.
///
/// Holds a unit-scale value; shifting and scaling happen after it is taken.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift32;
/// use sampler_distributions::continuous::normal::SpareNormal;
///
/// let mut engine = XorShift32::default();
/// let mut cache = SpareNormal::new();
///
/// let _first = cache.next(&mut engine);
/// assert!(cache.has_spare());
/// let _second = cache.next(&mut engine);
/// assert!(!cache.has_spare());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpareNormal {
    spare: Option<f32>,
}

impl SpareNormal {
    /// Creates an empty cache.
    #[inline]
    pub fn new() -> Self {
        Self { spare: None }
    }

    /// Returns the cached deviate if present, otherwise runs the polar loop,
    /// caches the second deviate and returns the first.
    #[inline]
    pub fn next<S: IidSource + ?Sized>(&mut self, source: &mut S) -> f32 {
        match self.spare.take() {
            Some(value) => value,
            None => {
                let (first, second) = marsaglia_pair(source);
                self.spare = Some(second);
                first
            }
        }
    }

    /// True if a spare deviate is waiting.
    #[inline]
    pub fn has_spare(&self) -> bool {
        self.spare.is_some()
    }

    /// Discards any cached deviate.
    #[inline]
    pub fn clear(&mut self) {
        self.spare = None;
    }
}

/// Parameters of a normal distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NormalParams {
    /// Location.
    pub mean: f32,
    /// Scale; `0` yields the mean on every draw.
    pub deviation: f32,
}

impl NormalParams {
    /// Creates a parameter set.
    pub fn new(mean: f32, deviation: f32) -> Self {
        Self { mean, deviation }
    }

    /// Checks that both values are finite and `deviation >= 0`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::ensure_finite("mean", self.mean as f64)?;
        ParameterError::ensure_finite("deviation", self.deviation as f64)?;
        if self.deviation < 0.0 {
            return Err(ParameterError::OutOfRange {
                name: "deviation",
                value: self.deviation as f64,
                expected: ">= 0",
            });
        }
        Ok(())
    }
}

impl Default for NormalParams {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Normal generator with spare-value caching.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::continuous::NormalGenerator;
///
/// let mut normal = NormalGenerator::new(XorShift128::default(), 10.0, 2.0);
/// let n = 50_000;
/// let mean = (0..n).map(|_| normal.generate() as f64).sum::<f64>() / n as f64;
/// assert!((mean - 10.0).abs() < 0.05);
/// ```
#[derive(Clone, Debug)]
pub struct NormalGenerator<S> {
    source: S,
    params: NormalParams,
    normals: SpareNormal,
}

impl<S: IidSource> NormalGenerator<S> {
    /// Creates a generator drawing from `source`.
    ///
    /// Parameters are checked with `debug_assert!` only.
    pub fn new(source: S, mean: f32, deviation: f32) -> Self {
        let params = NormalParams::new(mean, deviation);
        debug_assert!(params.validate().is_ok(), "invalid normal parameters: {:?}", params);
        Self {
            source,
            params,
            normals: SpareNormal::new(),
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(source: S, mean: f32, deviation: f32) -> Result<Self, ParameterError> {
        NormalParams::new(mean, deviation).validate()?;
        Ok(Self::new(source, mean, deviation))
    }

    /// Returns the mean.
    #[inline]
    pub fn mean(&self) -> f32 {
        self.params.mean
    }

    /// Returns the deviation.
    #[inline]
    pub fn deviation(&self) -> f32 {
        self.params.deviation
    }

    /// Returns the parameter set.
    #[inline]
    pub fn params(&self) -> NormalParams {
        self.params
    }

    /// Sets the mean and discards the spare deviate.
    pub fn set_mean(&mut self, mean: f32) {
        self.params.mean = mean;
        self.normals.clear();
    }

    /// Sets the deviation and discards the spare deviate.
    pub fn set_deviation(&mut self, deviation: f32) {
        debug_assert!(deviation >= 0.0, "deviation must be >= 0, got {}", deviation);
        self.params.deviation = deviation;
        self.normals.clear();
    }

    /// Replaces the source, discarding the spare deviate, and returns the old one.
    pub fn set_source(&mut self, source: S) -> S {
        self.normals.clear();
        std::mem::replace(&mut self.source, source)
    }

    /// Returns the source.
    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the source mutably, e.g. to restore an engine checkpoint.
    ///
    /// Restoring state does not clear the spare; call
    /// [`invalidate`](Self::invalidate) for an exact replay.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// True if the next draw will be served from the spare cache.
    #[inline]
    pub fn has_spare(&self) -> bool {
        self.normals.has_spare()
    }

    /// Discards the spare deviate.
    #[inline]
    pub fn invalidate(&mut self) {
        self.normals.clear();
    }
}

impl<S: IidSource> Generator<f32> for NormalGenerator<S> {
    #[inline]
    fn generate(&mut self) -> f32 {
        self.normals.next(&mut self.source) * self.params.deviation + self.params.mean
    }
}

impl GeneratorConfig for NormalParams {
    type Sample = f32;
    type Generator = NormalGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        NormalParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        NormalGenerator::new(engine, self.mean, self.deviation)
    }
}
