//! Simple rejection sampling over a fixed range.
//!
//! Candidate and check both come from one [`IidSource`]: the candidate is
//! `min + u·(max - min)` and is accepted when the next draw is at most
//! `probability(candidate)`. The same termination precondition as
//! [`acceptance_rejection`](super::acceptance_rejection) applies.

use sampler_core::iid::IidSource;
use sampler_core::traits::{Generator, ProbabilityFunction};
use sampler_core::types::ParameterError;

/// Draws candidates in `[min, max)` until one is accepted.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_distributions::continuous::rejection::generate;
///
/// let mut engine = XorShift128::default();
/// let x = generate(&mut engine, -1.0, 1.0, &|x: f32| 1.0 - x * x);
/// assert!((-1.0..1.0).contains(&x));
/// ```
#[inline]
pub fn generate<S, P>(source: &mut S, min: f32, max: f32, probability: &P) -> f32
where
    S: IidSource + ?Sized,
    P: ProbabilityFunction + ?Sized,
{
    let span = max - min;
    loop {
        let value = min + source.next_iid() * span;
        if source.next_iid() <= probability.probability(value) {
            return value;
        }
    }
}

/// Parameters of a rejection sampler's candidate range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectionParams {
    /// Lower bound of candidates.
    pub min: f32,
    /// Upper bound of candidates.
    pub max: f32,
}

impl RejectionParams {
    /// Checks a finite, ordered range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::ensure_range(self.min as f64, self.max as f64)
    }
}

/// Rejection generator owning a single source and an envelope.
#[derive(Clone, Debug)]
pub struct RejectionGenerator<S, P> {
    source: S,
    params: RejectionParams,
    probability: P,
}

impl<S: IidSource, P: ProbabilityFunction> RejectionGenerator<S, P> {
    /// Creates a generator sampling candidates from `[min, max)`.
    pub fn new(source: S, min: f32, max: f32, probability: P) -> Self {
        debug_assert!(min <= max, "rejection range inverted: [{}, {})", min, max);
        Self {
            source,
            params: RejectionParams { min, max },
            probability,
        }
    }

    /// Creates a generator after validating the range.
    pub fn try_new(source: S, min: f32, max: f32, probability: P) -> Result<Self, ParameterError> {
        RejectionParams { min, max }.validate()?;
        Ok(Self::new(source, min, max, probability))
    }

    /// Returns the candidate range.
    #[inline]
    pub fn params(&self) -> RejectionParams {
        self.params
    }

    /// Sets the candidate range.
    pub fn set_range(&mut self, min: f32, max: f32) {
        debug_assert!(min <= max, "rejection range inverted: [{}, {})", min, max);
        self.params = RejectionParams { min, max };
    }

    /// Replaces the envelope and returns the old one.
    pub fn set_probability(&mut self, probability: P) -> P {
        std::mem::replace(&mut self.probability, probability)
    }

    /// Returns the source mutably.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl<S: IidSource, P: ProbabilityFunction> Generator<f32> for RejectionGenerator<S, P> {
    #[inline]
    fn generate(&mut self) -> f32 {
        generate(&mut self.source, self.params.min, self.params.max, &self.probability)
    }
}
