//! Binomial distribution: successes in `upper_bound` Bernoulli trials.
//!
//! Each trial draws one uniform and succeeds when `u < p`. [`BinomialSetup`]
//! classifies the probability once so that `p <= 0` and `p >= 1` return
//! without drawing. `start_point` is added after counting.

use sampler_core::engines::DefaultEngine;
use sampler_core::iid::IidSource;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

use crate::provider::GeneratorConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum Trials {
    Never,
    Always,
    Bernoulli,
}

/// Cached classification of a success probability.
///
/// # Examples
///
/// ```rust
/// use sampler_distributions::discrete::BinomialSetup;
///
/// assert!(BinomialSetup::new(0.0).is_degenerate());
/// assert!(BinomialSetup::new(1.0).is_degenerate());
/// assert!(!BinomialSetup::new(0.3).is_degenerate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialSetup {
    probability: f32,
    trials: Trials,
}

impl BinomialSetup {
    /// Classifies `probability`.
    pub fn new(probability: f32) -> Self {
        debug_assert!(!probability.is_nan(), "binomial probability is NaN");
        let trials = if probability <= 0.0 {
            Trials::Never
        } else if probability >= 1.0 {
            Trials::Always
        } else {
            Trials::Bernoulli
        };
        Self { probability, trials }
    }

    /// The probability the setup was built from.
    #[inline]
    pub fn probability(&self) -> f32 {
        self.probability
    }

    /// True when the outcome is fixed and no draws are needed.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.trials != Trials::Bernoulli
    }
}

/// Draws one binomial variate offset by `start_point`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::XorShift128;
/// use sampler_distributions::discrete::binomial::{generate, BinomialSetup};
///
/// let mut engine = XorShift128::default();
/// let setup = BinomialSetup::new(1.0);
/// assert_eq!(generate(&mut engine, &setup, 10, 5), 15);
/// ```
#[inline]
pub fn generate<S: IidSource + ?Sized>(
    source: &mut S,
    setup: &BinomialSetup,
    upper_bound: u32,
    start_point: i32,
) -> i32 {
    let successes = match setup.trials {
        Trials::Never => 0,
        Trials::Always => upper_bound,
        Trials::Bernoulli => {
            let p = setup.probability;
            (0..upper_bound).filter(|_| source.next_iid() < p).count() as u32
        }
    };
    start_point.saturating_add_unsigned(successes)
}

/// Parameters of a binomial distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BinomialParams {
    /// Success probability per trial, in `[0, 1]`.
    pub probability: f32,
    /// Number of trials.
    pub upper_bound: u32,
    /// Offset added to the success count.
    pub start_point: i32,
}

impl BinomialParams {
    /// Creates a parameter set.
    pub fn new(probability: f32, upper_bound: u32, start_point: i32) -> Self {
        Self {
            probability,
            upper_bound,
            start_point,
        }
    }

    /// Checks that `probability` lies in `[0, 1]`.
    pub fn validate(&self) -> Result<(), ParameterError> {
        ParameterError::ensure_probability("probability", self.probability as f64)
    }
}

impl Default for BinomialParams {
    fn default() -> Self {
        Self::new(0.5, 10, 0)
    }
}

/// Binomial generator with a cached [`BinomialSetup`].
#[derive(Clone, Debug)]
pub struct BinomialGenerator<S> {
    source: S,
    setup: BinomialSetup,
    upper_bound: u32,
    start_point: i32,
}

impl<S: IidSource> BinomialGenerator<S> {
    /// Creates a generator.
    pub fn new(source: S, probability: f32, upper_bound: u32, start_point: i32) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "binomial probability must be in [0, 1], got {}",
            probability
        );
        Self {
            source,
            setup: BinomialSetup::new(probability),
            upper_bound,
            start_point,
        }
    }

    /// Creates a generator after validating the parameters.
    pub fn try_new(
        source: S,
        probability: f32,
        upper_bound: u32,
        start_point: i32,
    ) -> Result<Self, ParameterError> {
        BinomialParams::new(probability, upper_bound, start_point).validate()?;
        Ok(Self::new(source, probability, upper_bound, start_point))
    }

    /// Returns the parameter set.
    pub fn params(&self) -> BinomialParams {
        BinomialParams::new(self.setup.probability, self.upper_bound, self.start_point)
    }

    /// Sets the success probability, rebuilding the setup if it changed.
    pub fn set_probability(&mut self, probability: f32) {
        if probability != self.setup.probability {
            self.setup = BinomialSetup::new(probability);
        }
    }

    /// Sets the number of trials.
    pub fn set_upper_bound(&mut self, upper_bound: u32) {
        self.upper_bound = upper_bound;
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
        self.setup = BinomialSetup::new(self.setup.probability);
    }
}

impl<S: IidSource> Generator<i32> for BinomialGenerator<S> {
    #[inline]
    fn generate(&mut self) -> i32 {
        generate(&mut self.source, &self.setup, self.upper_bound, self.start_point)
    }
}

impl GeneratorConfig for BinomialParams {
    type Sample = i32;
    type Generator = BinomialGenerator<DefaultEngine>;

    fn validate(&self) -> Result<(), ParameterError> {
        BinomialParams::validate(self)
    }

    fn build(&self, engine: DefaultEngine) -> Self::Generator {
        BinomialGenerator::new(engine, self.probability, self.upper_bound, self.start_point)
    }
}
