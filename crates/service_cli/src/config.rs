//! Sampler configuration management.
//!
//! Loads `sampler.toml` with serde defaults for every field, applies
//! `SAMPLER_*` environment overrides and validates the result, collecting
//! every problem rather than stopping at the first.

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sampler_distributions::continuous::{BatesParams, GammaParams, NormalParams, UniformParams};
use sampler_distributions::discrete::{
    BinomialParams, GeometricParams, NegativeBinomialParams, PoissonParams,
};

/// Largest sample count a single command may request.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Uniform engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// 32-bit xorshift
    #[value(name = "xorshift32")]
    XorShift32,
    /// 64-bit xorshift
    #[value(name = "xorshift64")]
    XorShift64,
    /// 128-bit xorshift (four 32-bit words)
    #[default]
    #[value(name = "xorshift128")]
    XorShift128,
    /// xoroshiro128+
    #[value(name = "xoroshiro128plus")]
    Xoroshiro128Plus,
}

impl std::str::FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xorshift32" => Ok(Self::XorShift32),
            "xorshift64" => Ok(Self::XorShift64),
            "xorshift128" => Ok(Self::XorShift128),
            "xoroshiro128plus" => Ok(Self::Xoroshiro128Plus),
            _ => Err(ConfigError::Env(format!("unknown engine '{}'", s))),
        }
    }
}

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma separated values with a header row
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ConfigError::Env(format!("unknown format '{}'", s))),
        }
    }
}

/// Default parameters for each distribution, used when the command line
/// does not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionDefaults {
    /// Normal distribution
    pub normal: NormalParams,
    /// Gamma distribution
    pub gamma: GammaParams,
    /// Bates distribution
    pub bates: BatesParams,
    /// Uniform distribution
    pub uniform: UniformParams,
    /// Binomial distribution
    pub binomial: BinomialParams,
    /// Geometric distribution
    pub geometric: GeometricParams,
    /// Negative binomial distribution
    pub negative_binomial: NegativeBinomialParams,
    /// Poisson distribution
    pub poisson: PoissonParams,
}

/// Sampler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Engine used when the command line does not pick one
    #[serde(default)]
    pub engine: EngineKind,

    /// Fixed seed; `None` seeds from system entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Number of samples drawn per command
    #[serde(default = "default_samples")]
    pub samples: usize,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-distribution defaults
    #[serde(default)]
    pub distributions: DistributionDefaults,
}

fn default_samples() -> usize {
    1_000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            seed: None,
            samples: default_samples(),
            format: OutputFormat::default(),
            log_level: default_log_level(),
            distributions: DistributionDefaults::default(),
        }
    }
}

impl SamplerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load `path` if it exists, otherwise start from defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(engine) = lookup("SAMPLER_ENGINE") {
            self.engine = engine.parse()?;
        }

        if let Some(seed) = lookup("SAMPLER_SEED") {
            self.seed = Some(
                seed.parse()
                    .map_err(|_| ConfigError::Env(format!("SAMPLER_SEED '{}' is not a u64", seed)))?,
            );
        }

        if let Some(samples) = lookup("SAMPLER_SAMPLES") {
            self.samples = samples.parse().map_err(|_| {
                ConfigError::Env(format!("SAMPLER_SAMPLES '{}' is not a count", samples))
            })?;
        }

        if let Some(format) = lookup("SAMPLER_FORMAT") {
            self.format = format.parse()?;
        }

        if let Some(log_level) = lookup("SAMPLER_LOG_LEVEL") {
            self.log_level = log_level;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.samples == 0 {
            errors.push("samples must be greater than 0".to_string());
        }
        if self.samples > MAX_SAMPLES {
            errors.push(format!(
                "samples {} exceeds maximum allowed ({})",
                self.samples, MAX_SAMPLES
            ));
        }

        let d = &self.distributions;
        let checks = [
            ("normal", d.normal.validate()),
            ("gamma", d.gamma.validate()),
            ("bates", d.bates.validate()),
            ("uniform", d.uniform.validate()),
            ("binomial", d.binomial.validate()),
            ("geometric", d.geometric.validate()),
            ("negative_binomial", d.negative_binomial.validate()),
            ("poisson", d.poisson.validate()),
        ];
        for (section, result) in checks {
            if let Err(e) = result {
                errors.push(format!("distributions.{}: {}", section, e));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load with defaults and environment overrides, then validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override()?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),

    /// Malformed environment override
    #[error("Environment override error: {0}")]
    Env(String),

    /// Validation errors, one entry per problem
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_validates() {
        let config = SamplerConfig::default();
        assert_eq!(config.engine, EngineKind::XorShift128);
        assert_eq!(config.samples, 1_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SamplerConfig::from_toml(
            r#"
            engine = "xoroshiro128plus"
            seed = 7

            [distributions.gamma]
            alpha = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.engine, EngineKind::Xoroshiro128Plus);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.distributions.gamma.alpha, 2.5);
        assert_eq!(config.distributions.gamma.beta, 1.0);
        assert_eq!(config.distributions.normal, NormalParams::default());
    }

    #[test]
    fn test_unknown_engine_is_parse_error() {
        let result = SamplerConfig::from_toml(r#"engine = "mersenne""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let config = SamplerConfig::default()
            .with_overrides(lookup(&[
                ("SAMPLER_ENGINE", "XorShift32"),
                ("SAMPLER_SEED", "99"),
                ("SAMPLER_SAMPLES", "25"),
                ("SAMPLER_FORMAT", "csv"),
            ]))
            .unwrap();

        assert_eq!(config.engine, EngineKind::XorShift32);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.samples, 25);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_malformed_override() {
        let result = SamplerConfig::default().with_overrides(lookup(&[("SAMPLER_SEED", "abc")]));
        assert!(matches!(result, Err(ConfigError::Env(msg)) if msg.contains("SAMPLER_SEED")));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let mut config = SamplerConfig::default();
        config.log_level = "loud".to_string();
        config.samples = 0;
        config.distributions.gamma.alpha = -1.0;
        config.distributions.poisson.lambda = -2.0;

        match config.validate() {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 4, "{:?}", errors);
                assert!(errors.iter().any(|e| e.contains("log_level")));
                assert!(errors.iter().any(|e| e.contains("distributions.gamma")));
                assert!(errors.iter().any(|e| e.contains("distributions.poisson")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_samples_upper_bound() {
        let mut config = SamplerConfig::default();
        config.samples = MAX_SAMPLES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SamplerConfig::default();
        config.seed = Some(3);
        config.distributions.binomial.upper_bound = 40;
        let text = config.to_toml().unwrap();
        assert_eq!(SamplerConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
