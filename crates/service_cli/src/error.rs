//! CLI error types.

use sampler_core::types::{CurveError, ParameterError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `sampler` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Distribution or engine parameters rejected
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// Probability curve could not be built
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Command line argument that parsed but makes no sense
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Writing output failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Build an invalid-argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
