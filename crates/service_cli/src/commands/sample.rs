//! Sample command implementation
//!
//! Draws from a distribution and prints either a summary or the raw draws.
//! Parameters left off the command line fall back to the
//! `[distributions.*]` sections of the configuration file.

use std::io::Write;

use clap::Subcommand;
use tracing::{debug, info};

use sampler_core::math::ProbabilityCurve;
use sampler_core::traits::Generator;
use sampler_distributions::continuous::{
    BatesGenerator, GammaGenerator, NormalGenerator, RejectionGenerator, RejectionParams,
    UniformGenerator,
};
use sampler_distributions::discrete::{
    BinomialGenerator, Filtered, GeometricGenerator, NegativeBinomialGenerator, NoRecent,
    PoissonGenerator, WeightedGenerator, WeightedTable,
};

use super::{write_values, Summary};
use crate::config::{DistributionDefaults, EngineKind, OutputFormat};
use crate::source::AnyEngine;
use crate::{CliError, Result};

/// Distribution to sample from.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Distribution {
    /// Normal distribution (Marsaglia polar method)
    Normal {
        /// Mean
        #[arg(long, allow_hyphen_values = true)]
        mean: Option<f32>,
        /// Standard deviation
        #[arg(long)]
        deviation: Option<f32>,
    },

    /// Gamma distribution (Marsaglia-Tsang)
    Gamma {
        /// Shape
        #[arg(long)]
        alpha: Option<f32>,
        /// Scale
        #[arg(long)]
        beta: Option<f32>,
    },

    /// Bates distribution: mean of uniform draws
    Bates {
        /// Uniform draws averaged per sample
        #[arg(long)]
        terms: Option<u32>,
        /// Lower bound
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f32>,
        /// Upper bound
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f32>,
    },

    /// Uniform distribution over a range
    Uniform {
        /// Lower bound
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f32>,
        /// Upper bound
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f32>,
    },

    /// Binomial distribution
    Binomial {
        /// Success probability per trial
        #[arg(short, long)]
        probability: Option<f32>,
        /// Number of trials
        #[arg(long)]
        upper_bound: Option<u32>,
        /// Offset added to the success count
        #[arg(long, allow_hyphen_values = true)]
        start_point: Option<i32>,
    },

    /// Negative binomial distribution
    NegativeBinomial {
        /// Success probability per trial
        #[arg(short, long)]
        probability: Option<f32>,
        /// Successes to wait for
        #[arg(long)]
        successes: Option<u32>,
        /// Offset added to the failure count
        #[arg(long, allow_hyphen_values = true)]
        start_point: Option<i32>,
    },

    /// Geometric distribution
    Geometric {
        /// Success probability per trial
        #[arg(short, long)]
        probability: Option<f32>,
        /// Offset added to the failure count
        #[arg(long, allow_hyphen_values = true)]
        start_point: Option<i32>,
    },

    /// Poisson distribution
    Poisson {
        /// Rate
        #[arg(long)]
        lambda: Option<f64>,
        /// Offset added to the event count
        #[arg(long, allow_hyphen_values = true)]
        start_point: Option<i32>,
    },

    /// Weighted choice of the indices `0..weights.len()`
    Weighted {
        /// Comma separated integer weights
        #[arg(long, value_delimiter = ',', required = true)]
        weights: Vec<u32>,
        /// Reject an index drawn within the last N accepted draws
        #[arg(long)]
        no_recent: Option<usize>,
    },

    /// Rejection sampling against a piecewise linear probability curve
    Curve {
        /// Curve knot x-coordinates, strictly increasing
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        xs: Vec<f32>,
        /// Acceptance probability at each knot, clamped to `[0, 1]`
        #[arg(long, value_delimiter = ',', required = true)]
        ys: Vec<f32>,
        /// Lower bound of the candidate range; defaults to the first knot
        #[arg(long, allow_hyphen_values = true)]
        min: Option<f32>,
        /// Upper bound of the candidate range; defaults to the last knot
        #[arg(long, allow_hyphen_values = true)]
        max: Option<f32>,
    },
}

impl Distribution {
    /// Kebab-case name used in output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "normal",
            Self::Gamma { .. } => "gamma",
            Self::Bates { .. } => "bates",
            Self::Uniform { .. } => "uniform",
            Self::Binomial { .. } => "binomial",
            Self::NegativeBinomial { .. } => "negative-binomial",
            Self::Geometric { .. } => "geometric",
            Self::Poisson { .. } => "poisson",
            Self::Weighted { .. } => "weighted",
            Self::Curve { .. } => "curve",
        }
    }
}

/// Resolved run options shared by every distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleOptions {
    /// Engine to draw from
    pub engine: EngineKind,
    /// Fixed seed, or `None` for entropy
    pub seed: Option<u64>,
    /// Number of draws
    pub count: usize,
    /// Output format
    pub format: OutputFormat,
    /// Print every draw instead of a summary
    pub raw: bool,
}

/// Draws from either family.
#[derive(Debug, Clone, PartialEq)]
pub enum Draws {
    /// Continuous samples
    Continuous(Vec<f32>),
    /// Discrete samples
    Discrete(Vec<i32>),
}

impl Draws {
    fn to_f64(&self) -> Vec<f64> {
        match self {
            Self::Continuous(values) => values.iter().map(|&v| v as f64).collect(),
            Self::Discrete(values) => values.iter().map(|&v| v as f64).collect(),
        }
    }
}

/// Largest acceptance probability over `[min, max]`.
///
/// The curve is piecewise linear, so the peak sits at a range end or at a
/// knot inside the range.
fn peak_probability(curve: &ProbabilityCurve, min: f32, max: f32) -> f32 {
    let knots = curve.curve();
    knots
        .xs()
        .iter()
        .zip(knots.ys())
        .filter(|&(&x, _)| min <= x && x <= max)
        .map(|(_, &y)| y)
        .fold(curve.evaluate(min).max(curve.evaluate(max)), f32::max)
}

fn take<T, G: Generator<T>>(mut generator: G, count: usize) -> Vec<T> {
    generator.samples().take(count).collect()
}

/// Builds the generator for `distribution` and draws `count` samples.
pub fn draw(
    distribution: &Distribution,
    defaults: &DistributionDefaults,
    engine: AnyEngine,
    count: usize,
) -> Result<Draws> {
    let draws = match *distribution {
        Distribution::Normal { mean, deviation } => {
            let p = &defaults.normal;
            let generator = NormalGenerator::try_new(
                engine,
                mean.unwrap_or(p.mean),
                deviation.unwrap_or(p.deviation),
            )?;
            Draws::Continuous(take(generator, count))
        }
        Distribution::Gamma { alpha, beta } => {
            let p = &defaults.gamma;
            let generator =
                GammaGenerator::try_new(engine, alpha.unwrap_or(p.alpha), beta.unwrap_or(p.beta))?;
            Draws::Continuous(take(generator, count))
        }
        Distribution::Bates { terms, min, max } => {
            let p = &defaults.bates;
            let generator = BatesGenerator::try_new(
                engine,
                terms.unwrap_or(p.count),
                min.unwrap_or(p.min),
                max.unwrap_or(p.max),
            )?;
            Draws::Continuous(take(generator, count))
        }
        Distribution::Uniform { min, max } => {
            let p = &defaults.uniform;
            let generator =
                UniformGenerator::try_new(engine, min.unwrap_or(p.min), max.unwrap_or(p.max))?;
            Draws::Continuous(take(generator, count))
        }
        Distribution::Binomial {
            probability,
            upper_bound,
            start_point,
        } => {
            let p = &defaults.binomial;
            let generator = BinomialGenerator::try_new(
                engine,
                probability.unwrap_or(p.probability),
                upper_bound.unwrap_or(p.upper_bound),
                start_point.unwrap_or(p.start_point),
            )?;
            Draws::Discrete(take(generator, count))
        }
        Distribution::NegativeBinomial {
            probability,
            successes,
            start_point,
        } => {
            let p = &defaults.negative_binomial;
            let generator = NegativeBinomialGenerator::try_new(
                engine,
                probability.unwrap_or(p.probability),
                successes.unwrap_or(p.successes),
                start_point.unwrap_or(p.start_point),
            )?;
            Draws::Discrete(take(generator, count))
        }
        Distribution::Geometric {
            probability,
            start_point,
        } => {
            let p = &defaults.geometric;
            let generator = GeometricGenerator::try_new(
                engine,
                probability.unwrap_or(p.probability),
                start_point.unwrap_or(p.start_point),
            )?;
            Draws::Discrete(take(generator, count))
        }
        Distribution::Poisson {
            lambda,
            start_point,
        } => {
            let p = &defaults.poisson;
            let generator = PoissonGenerator::try_new(
                engine,
                lambda.unwrap_or(p.lambda),
                start_point.unwrap_or(p.start_point),
            )?;
            Draws::Discrete(take(generator, count))
        }
        Distribution::Weighted {
            ref weights,
            no_recent,
        } => {
            let indices: Vec<i32> = (0..weights.len() as i32).collect();
            let table = WeightedTable::new(indices, weights)?;
            let generator = WeightedGenerator::new(engine, table);
            match no_recent {
                Some(window) => {
                    let reachable = weights.iter().filter(|&&w| w > 0).count();
                    if reachable <= window {
                        return Err(CliError::invalid_argument(format!(
                            "--no-recent {} needs more than {} positive weights, got {}",
                            window, window, reachable
                        )));
                    }
                    Draws::Discrete(take(Filtered::new(generator, NoRecent::new(window)), count))
                }
                None => Draws::Discrete(take(generator, count)),
            }
        }
        Distribution::Curve {
            ref xs,
            ref ys,
            min,
            max,
        } => {
            let curve = ProbabilityCurve::new(xs, ys)?;
            let (first, last) = curve.curve().domain();
            let range = RejectionParams {
                min: min.unwrap_or(first),
                max: max.unwrap_or(last),
            };
            range.validate()?;
            if peak_probability(&curve, range.min, range.max) <= 0.0 {
                return Err(CliError::invalid_argument(format!(
                    "probability curve never accepts a candidate in [{}, {}]",
                    range.min, range.max
                )));
            }
            let generator = RejectionGenerator::new(engine, range.min, range.max, curve);
            Draws::Continuous(take(generator, count))
        }
    };
    Ok(draws)
}

/// Run the sample command
pub fn run(
    out: &mut impl Write,
    distribution: &Distribution,
    defaults: &DistributionDefaults,
    options: &SampleOptions,
) -> Result<()> {
    let engine = AnyEngine::new(options.engine, options.seed);
    let engine_name = engine.name();
    info!(
        distribution = distribution.name(),
        engine = engine_name,
        seed = ?options.seed,
        count = options.count,
        "Sampling"
    );
    debug!(?distribution, "Resolved distribution arguments");

    let draws = draw(distribution, defaults, engine, options.count)?;

    if options.raw {
        match &draws {
            Draws::Continuous(values) => write_values(out, values, options.format)?,
            Draws::Discrete(values) => write_values(out, values, options.format)?,
        }
    } else {
        Summary::from_samples(
            distribution.name(),
            engine_name,
            options.seed,
            &draws.to_f64(),
        )
        .write_to(out, options.format)?;
    }

    info!("Sampling complete");
    Ok(())
}
