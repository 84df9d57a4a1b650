//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands write to any
//! [`Write`] so they can be exercised against a buffer in tests.

pub mod check;
pub mod engine;
pub mod sample;

use std::io::Write;

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// Descriptive statistics of a batch of draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Distribution name
    pub distribution: String,
    /// Engine name
    pub engine: &'static str,
    /// Seed, if one was fixed
    pub seed: Option<u64>,
    /// Number of draws
    pub count: usize,
    /// Sample mean
    pub mean: f64,
    /// Population variance of the draws
    pub variance: f64,
    /// Smallest draw
    pub min: f64,
    /// Largest draw
    pub max: f64,
}

impl Summary {
    /// Summarises `samples`; all statistics are zero for an empty batch.
    pub fn from_samples(
        distribution: impl Into<String>,
        engine: &'static str,
        seed: Option<u64>,
        samples: &[f64],
    ) -> Self {
        let count = samples.len();
        let (mean, variance, min, max) = if count == 0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let mean = samples.iter().sum::<f64>() / count as f64;
            let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;
            let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
            let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (mean, variance, min, max)
        };
        Self {
            distribution: distribution.into(),
            engine,
            seed,
            count,
            mean,
            variance,
            min,
            max,
        }
    }

    /// Renders the summary in `format`.
    pub fn write_to(&self, out: &mut impl Write, format: OutputFormat) -> Result<()> {
        let seed = self
            .seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "entropy".to_string());
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)?;
            }
            OutputFormat::Csv => {
                writeln!(out, "distribution,engine,seed,count,mean,variance,min,max")?;
                writeln!(
                    out,
                    "{},{},{},{},{},{},{},{}",
                    self.distribution,
                    self.engine,
                    seed,
                    self.count,
                    self.mean,
                    self.variance,
                    self.min,
                    self.max
                )?;
            }
            OutputFormat::Table => {
                let rows = [
                    ("Distribution", self.distribution.clone()),
                    ("Engine", self.engine.to_string()),
                    ("Seed", seed),
                    ("Count", self.count.to_string()),
                    ("Mean", format!("{:.6}", self.mean)),
                    ("Variance", format!("{:.6}", self.variance)),
                    ("Min", format!("{:.6}", self.min)),
                    ("Max", format!("{:.6}", self.max)),
                ];
                write_table(out, &rows)?;
            }
        }
        Ok(())
    }
}

/// Writes two-column key/value rows as a box-drawn table.
fn write_table(out: &mut impl Write, rows: &[(&str, String)]) -> Result<()> {
    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    for (key, value) in rows {
        writeln!(
            out,
            "│ {:<kw$} │ {:>vw$} │",
            key,
            value,
            kw = key_width,
            vw = value_width
        )?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}

/// Writes each value on its own line, or as a JSON array.
pub fn write_values<T>(out: &mut impl Write, values: &[T], format: OutputFormat) -> Result<()>
where
    T: Serialize + std::fmt::Display,
{
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, values)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "value")?;
            for value in values {
                writeln!(out, "{}", value)?;
            }
        }
        OutputFormat::Table => {
            for value in values {
                writeln!(out, "{}", value)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_statistics() {
        let summary = Summary::from_samples("test", "XorShift32", Some(1), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.mean, 2.5);
        assert_relative_eq!(summary.variance, 1.25);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_samples("test", "XorShift32", None, &[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn test_csv_has_header_and_row() {
        let summary = Summary::from_samples("uniform", "XorShift128", None, &[0.5]);
        let mut out = Vec::new();
        summary.write_to(&mut out, OutputFormat::Csv).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("distribution,engine"));
        assert!(lines[1].starts_with("uniform,XorShift128,entropy,1,"));
    }

    #[test]
    fn test_json_summary_parses() {
        let summary = Summary::from_samples("gamma", "XorShift64", Some(9), &[1.0, 3.0]);
        let mut out = Vec::new();
        summary.write_to(&mut out, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["distribution"], "gamma");
        assert_eq!(value["seed"], 9);
        assert_eq!(value["mean"], 2.0);
    }

    #[test]
    fn test_table_is_boxed() {
        let summary = Summary::from_samples("normal", "XorShift32", Some(3), &[0.0]);
        let mut out = Vec::new();
        summary.write_to(&mut out, OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('┌'));
        assert!(text.contains("│ Distribution │"));
        assert!(text.trim_end().ends_with('┘'));
    }

    #[test]
    fn test_values_as_json_array() {
        let mut out = Vec::new();
        write_values(&mut out, &[1, 2, 3], OutputFormat::Json).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[1,2,3]\n");
    }
}
