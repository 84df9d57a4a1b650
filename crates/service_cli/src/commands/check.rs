//! Check command implementation
//!
//! Validates the configuration and prints the effective settings after
//! defaults and environment overrides.

use std::io::Write;

use tracing::info;

use crate::config::SamplerConfig;
use crate::Result;

/// Run the check command
pub fn run(out: &mut impl Write, config: &SamplerConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;

    writeln!(out, "# Configuration OK")?;
    write!(out, "{}", config.to_toml()?)?;

    info!("Configuration check complete");
    Ok(())
}
