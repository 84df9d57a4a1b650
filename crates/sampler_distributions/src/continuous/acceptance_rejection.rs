//! Acceptance-rejection sampling against a probability envelope.
//!
//! Candidates come from any `Generator<f32>`; acceptance checks come from a
//! separate [`IidSource`]. A candidate `x` is accepted when
//! `check <= probability(x)`.
//!
//! ## Termination
//!
//! The loop has no iteration cap. The probability function must reach 1
//! somewhere in the candidate domain; one that is zero everywhere the
//! candidates fall never terminates. Capping the loop would bias the output,
//! so this is left as a caller precondition.

use sampler_core::iid::IidSource;
use sampler_core::traits::{Generator, ProbabilityFunction};

/// Draws candidates and checks until one is accepted.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::{XorShift32, XorShift64};
/// use sampler_core::traits::generator;
/// use sampler_core::iid::IidSource;
/// use sampler_distributions::continuous::acceptance_rejection::generate;
///
/// let mut engine = XorShift64::default();
/// let mut values = generator::from_fn(move || engine.next_iid());
/// let mut checks = XorShift32::default();
///
/// // Triangular density on [0, 1)
/// let x = generate(&mut values, &mut checks, &|x: f32| 1.0 - (2.0 * x - 1.0).abs());
/// assert!((0.0..1.0).contains(&x));
/// ```
#[inline]
pub fn generate<V, C, P>(values: &mut V, checks: &mut C, probability: &P) -> f32
where
    V: Generator<f32> + ?Sized,
    C: IidSource + ?Sized,
    P: ProbabilityFunction + ?Sized,
{
    loop {
        let value = values.generate();
        let check = checks.next_iid();
        if check <= probability.probability(value) {
            return value;
        }
    }
}

/// Acceptance-rejection generator owning its value source, check source and
/// envelope.
///
/// # Examples
///
/// ```rust
/// use sampler_core::engines::{XorShift128, XorShift32};
/// use sampler_core::math::ProbabilityCurve;
/// use sampler_core::traits::Generator;
/// use sampler_distributions::continuous::{AcceptanceRejectionGenerator, UniformGenerator};
///
/// let curve = ProbabilityCurve::new(&[0.0, 1.0], &[1.0, 0.0]).unwrap();
/// let values = UniformGenerator::new(XorShift128::default(), 0.0, 1.0);
/// let mut sampler = AcceptanceRejectionGenerator::new(values, XorShift32::default(), curve);
///
/// // Density 2(1 - x): mean 1/3
/// let n = 20_000;
/// let mean = (0..n).map(|_| sampler.generate() as f64).sum::<f64>() / n as f64;
/// assert!((mean - 1.0 / 3.0).abs() < 0.01);
/// ```
#[derive(Clone, Debug)]
pub struct AcceptanceRejectionGenerator<V, C, P> {
    values: V,
    checks: C,
    probability: P,
}

impl<V, C, P> AcceptanceRejectionGenerator<V, C, P>
where
    V: Generator<f32>,
    C: IidSource,
    P: ProbabilityFunction,
{
    /// Creates a generator from its three collaborators.
    pub fn new(values: V, checks: C, probability: P) -> Self {
        Self {
            values,
            checks,
            probability,
        }
    }

    /// Returns the envelope.
    #[inline]
    pub fn probability(&self) -> &P {
        &self.probability
    }

    /// Replaces the envelope and returns the old one.
    pub fn set_probability(&mut self, probability: P) -> P {
        std::mem::replace(&mut self.probability, probability)
    }

    /// Returns the candidate generator mutably.
    #[inline]
    pub fn values_mut(&mut self) -> &mut V {
        &mut self.values
    }

    /// Replaces the candidate generator and returns the old one.
    pub fn set_values(&mut self, values: V) -> V {
        std::mem::replace(&mut self.values, values)
    }

    /// Returns the check source mutably.
    #[inline]
    pub fn checks_mut(&mut self) -> &mut C {
        &mut self.checks
    }

    /// Replaces the check source and returns the old one.
    pub fn set_checks(&mut self, checks: C) -> C {
        std::mem::replace(&mut self.checks, checks)
    }

    /// Splits the generator back into its parts.
    pub fn into_parts(self) -> (V, C, P) {
        (self.values, self.checks, self.probability)
    }
}

impl<V, C, P> Generator<f32> for AcceptanceRejectionGenerator<V, C, P>
where
    V: Generator<f32>,
    C: IidSource,
    P: ProbabilityFunction,
{
    #[inline]
    fn generate(&mut self) -> f32 {
        generate(&mut self.values, &mut self.checks, &self.probability)
    }
}
