//! Sampler CLI - Command Line Front End for the Sampling Library
//!
//! Draws from the uniform engines and the continuous and discrete
//! distributions, printing summaries or raw draws.
//!
//! # Commands
//!
//! - `sampler sample <distribution>` - Draw from a distribution
//! - `sampler engine` - Print raw engine output
//! - `sampler check` - Validate and print the effective configuration
//!
//! # Configuration
//!
//! Settings are read from `sampler.toml` (or `--config <path>`) when the
//! file exists, then overridden by `SAMPLER_*` environment variables, then
//! by command line flags.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod source;

pub use error::{CliError, Result};

use commands::engine::DrawKind;
use commands::sample::{Distribution, SampleOptions};
use config::{EngineKind, OutputFormat, SamplerConfig, MAX_SAMPLES};

/// Random sampling CLI
#[derive(Parser)]
#[command(name = "sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "sampler.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw samples from a distribution
    Sample {
        /// Number of samples
        #[arg(short = 'n', long, global = true)]
        count: Option<usize>,

        /// Seed; omitted means system entropy
        #[arg(short, long, global = true)]
        seed: Option<u64>,

        /// Uniform engine
        #[arg(short, long, global = true, value_enum)]
        engine: Option<EngineKind>,

        /// Output format
        #[arg(short, long, global = true, value_enum)]
        format: Option<OutputFormat>,

        /// Print every draw instead of a summary
        #[arg(long, global = true)]
        raw: bool,

        #[command(subcommand)]
        distribution: Distribution,
    },

    /// Print raw engine output
    Engine {
        /// Uniform engine
        #[arg(short, long, value_enum)]
        kind: Option<EngineKind>,

        /// Seed; omitted means system entropy
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of draws
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Kind of draw
        #[arg(short, long, value_enum, default_value_t = DrawKind::Float)]
        draw: DrawKind,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate and print the effective configuration
    Check,
}

fn init_tracing(verbose: bool, log_level: &str) {
    let default_level = if verbose { "debug" } else { log_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn resolve_count(count: Option<usize>, config: &SamplerConfig) -> Result<usize> {
    let count = count.unwrap_or(config.samples);
    if count == 0 || count > MAX_SAMPLES {
        return Err(CliError::invalid_argument(format!(
            "sample count {} must be in 1..={}",
            count, MAX_SAMPLES
        )));
    }
    Ok(count)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SamplerConfig::load_or_default(&cli.config)
        .and_then(SamplerConfig::with_env_override)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    init_tracing(cli.verbose, &config.log_level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Effective configuration");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Sample {
            count,
            seed,
            engine,
            format,
            raw,
            distribution,
        } => {
            config.validate()?;
            let options = SampleOptions {
                engine: engine.unwrap_or(config.engine),
                seed: seed.or(config.seed),
                count: resolve_count(count, &config)?,
                format: format.unwrap_or(config.format),
                raw,
            };
            commands::sample::run(&mut out, &distribution, &config.distributions, &options)?;
        }
        Commands::Engine {
            kind,
            seed,
            count,
            draw,
            format,
        } => {
            commands::engine::run(
                &mut out,
                kind.unwrap_or(config.engine),
                seed.or(config.seed),
                resolve_count(count, &config)?,
                draw,
                format.unwrap_or(config.format),
            )?;
        }
        Commands::Check => commands::check::run(&mut out, &config)?,
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sample_with_negative_bounds() {
        let cli = Cli::try_parse_from([
            "sampler", "sample", "uniform", "--min", "-3", "--max", "-1", "-n", "50", "--seed", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Sample {
                count,
                seed,
                distribution,
                ..
            } => {
                assert_eq!(count, Some(50));
                assert_eq!(seed, Some(4));
                assert_eq!(
                    distribution,
                    Distribution::Uniform {
                        min: Some(-3.0),
                        max: Some(-1.0)
                    }
                );
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_parse_weights_list() {
        let cli = Cli::try_parse_from([
            "sampler", "sample", "weighted", "--weights", "1,0,4", "--engine", "xoroshiro128plus",
        ])
        .unwrap();
        match cli.command {
            Commands::Sample {
                engine,
                distribution: Distribution::Weighted { weights, no_recent },
                ..
            } => {
                assert_eq!(engine, Some(EngineKind::Xoroshiro128Plus));
                assert_eq!(weights, vec![1, 0, 4]);
                assert_eq!(no_recent, None);
            }
            _ => panic!("expected weighted sample command"),
        }
    }

    #[test]
    fn test_resolve_count_bounds() {
        let config = SamplerConfig::default();
        assert_eq!(resolve_count(None, &config).unwrap(), 1_000);
        assert!(resolve_count(Some(0), &config).is_err());
        assert!(resolve_count(Some(MAX_SAMPLES + 1), &config).is_err());
    }
}
