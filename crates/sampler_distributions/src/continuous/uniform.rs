//! Continuous uniform distribution over `[min, max)`.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

/// Maps one IID draw onto `[min, max)`.
#[inline]
pub fn generate<S: IidSource + ?Sized>(source: &mut S, min: f32, max: f32) -> f32 {
    min + source.next_iid() * (max - min)
}

/// Parameters of a uniform distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UniformParams {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (exclusive for exclusive sources).
    pub max: f32,
}

impl UniformParams {
    /// Creates a parameter set.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Checks a finite, ordered range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::ensure_range(self.min as f64, self.max as f64)
    }
}

impl Default for UniformParams {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// Uniform generator over a fixed range.
#[derive(Clone, Debug)]
pub struct UniformGenerator<S> {
    source: S,
    params: UniformParams,
}

impl<S: IidSource> UniformGenerator<S> {
    /// Creates a generator over `[min, max)`.
    pub fn new(source: S, min: f32, max: f32) -> Self {
        debug_assert!(min <= max, "uniform range inverted: [{}, {})", min, max);
        Self {
            source,
            params: UniformParams::new(min, max),
        }
    }

    /// Creates a generator after validating the range.
    pub fn try_new(source: S, min: f32, max: f32) -> Result<Self, ParameterError> {
        UniformParams::new(min, max).validate()?;
        Ok(Self::new(source, min, max))
    }

    /// Returns the parameter set.
    #[inline]
    pub fn params(&self) -> UniformParams {
        self.params
    }

    /// Sets the range.
    pub fn set_range(&mut self, min: f32, max: f32) {
        debug_assert!(min <= max, "uniform range inverted: [{}, {})", min, max);
        self.params = UniformParams::new(min, max);
    }

    /// Returns the source mutably.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: IidSource> Generator<f32> for UniformGenerator<S> {
    #[inline]
    fn generate(&mut self) -> f32 {
        generate(&mut self.source, self.params.min, self.params.max)
    }
}

impl GeneratorConfig for UniformParams {
    type Sample = f32;
    type Generator = UniformGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        UniformParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        UniformGenerator::new(engine, self.min, self.max)
    }
}
