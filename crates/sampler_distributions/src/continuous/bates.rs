//! Bates distribution: the mean of `count` uniforms over `[min, max)`.
//!
//! Each draw sums `count` scaled uniforms. The scale `(max - min) / count` is
//! cached in [`BatesSetup`], so the hot loop is one multiply-add per uniform.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

/// Cached constants of a Bates distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatesSetup {
    count: u32,
    min: f32,
    max: f32,
    scale: f32,
}

impl BatesSetup {
    /// Derives the per-uniform scale for `count >= 1` and `min <= max`.
    pub fn new(count: u32, min: f32, max: f32) -> Self {
        debug_assert!(count > 0, "bates count must be >= 1");
        debug_assert!(min <= max, "bates range inverted: [{}, {})", min, max);
        Self {
            count,
            min,
            max,
            scale: (max - min) / count as f32,
        }
    }

    /// Number of uniforms averaged per draw.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Lower bound.
    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }
}

/// Draws one Bates variate.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift32;
/// use sampler_distributions::continuous::bates::{generate, BatesSetup};
///
/// let mut engine = XorShift32::default();
/// let setup = BatesSetup::new(4, -1.0, 1.0);
/// let x = generate(&mut engine, &setup);
/// assert!((-1.0..=1.0).contains(&x));
/// ```
#[inline]
pub fn generate<S: IidSource + ?Sized>(source: &mut S, setup: &BatesSetup) -> f32 {
    let mut sum = setup.min;
    for _ in 0..setup.count {
        sum += source.next_iid() * setup.scale;
    }
    sum
}

/// Parameters of a Bates distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatesParams {
    /// Uniforms per draw, `>= 1`.
    pub count: u32,
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
}

impl BatesParams {
    /// Creates a parameter set.
    pub fn new(count: u32, min: f32, max: f32) -> Self {
        Self { count, min, max }
    }

    /// Checks `count >= 1` and a finite, ordered range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.count == 0 {
            return Err(ParameterError::OutOfRange {
                name: "count",
                value: 0.0,
                expected: ">= 1",
            });
        }
        ParameterError::ensure_range(self.min as f64, self.max as f64)
    }
}

impl Default for BatesParams {
    fn default() -> Self {
        Self::new(2, 0.0, 1.0)
    }
}

/// Bates generator with a cached [`BatesSetup`].
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::continuous::BatesGenerator;
///
/// let mut bates = BatesGenerator::new(XorShift128::default(), 12, 0.0, 1.0);
/// let n = 20_000;
/// let mean = (0..n).map(|_| bates.generate() as f64).sum::<f64>() / n as f64;
/// assert!((mean - 0.5).abs() < 0.01);
/// ```
#[derive(Clone, Debug)]
pub struct BatesGenerator<S> {
    source: S,
    setup: BatesSetup,
}

impl<S: IidSource> BatesGenerator<S> {
    /// Creates a generator averaging `count` uniforms over `[min, max)`.
    pub fn new(source: S, count: u32, min: f32, max: f32) -> Self {
        Self {
            source,
            setup: BatesSetup::new(count, min, max),
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(source: S, count: u32, min: f32, max: f32) -> Result<Self, ParameterError> {
        BatesParams::new(count, min, max).validate()?;
        Ok(Self::new(source, count, min, max))
    }

    /// Returns the cached setup.
    #[inline]
    pub fn setup(&self) -> &BatesSetup {
        &self.setup
    }

    /// Sets the number of uniforms per draw.
    pub fn set_count(&mut self, count: u32) {
        self.setup = BatesSetup::new(count, self.setup.min, self.setup.max);
    }

    /// Sets the range.
    pub fn set_range(&mut self, min: f32, max: f32) {
        self.setup = BatesSetup::new(self.setup.count, min, max);
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
}

impl<S: IidSource> Generator<f32> for BatesGenerator<S> {
    #[inline]
    fn generate(&mut self) -> f32 {
        generate(&mut self.source, &self.setup)
    }
}

impl GeneratorConfig for BatesParams {
    type Sample = f32;
    type Generator = BatesGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        BatesParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        BatesGenerator::new(engine, self.count, self.min, self.max)
    }
}
