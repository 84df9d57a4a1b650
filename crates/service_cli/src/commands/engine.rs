//! Engine command implementation
//!
//! Prints raw draws from one of the uniform engines.

use std::fmt;
use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use super::write_values;
use crate::config::{EngineKind, OutputFormat};
use crate::source::AnyEngine;
use crate::Result;

/// Width and kind of raw draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DrawKind {
    /// 32-bit integers
    Uint,
    /// 64-bit integers
    Ulong,
    /// Floats in `[0, 1)`
    #[default]
    Float,
    /// Doubles in `[0, 1)`
    Double,
}

/// A single raw draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawDraw {
    /// 32-bit integer
    Uint(u32),
    /// 64-bit integer
    Ulong(u64),
    /// Float
    Float(f32),
    /// Double
    Double(f64),
}

impl fmt::Display for RawDraw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uint(v) => write!(f, "{}", v),
            Self::Ulong(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
        }
    }
}

/// Draws `count` values of kind `draw` from `engine`.
pub fn draw(engine: &mut AnyEngine, draw: DrawKind, count: usize) -> Vec<RawDraw> {
    (0..count)
        .map(|_| match draw {
            DrawKind::Uint => RawDraw::Uint(engine.next_uint()),
            DrawKind::Ulong => RawDraw::Ulong(engine.next_ulong()),
            DrawKind::Float => RawDraw::Float(engine.next_float()),
            DrawKind::Double => RawDraw::Double(engine.next_double()),
        })
        .collect()
}

/// Run the engine command
pub fn run(
    out: &mut impl Write,
    kind: EngineKind,
    seed: Option<u64>,
    count: usize,
    kind_of_draw: DrawKind,
    format: OutputFormat,
) -> Result<()> {
    let mut engine = AnyEngine::new(kind, seed);
    info!(
        engine = engine.name(),
        seed = ?seed,
        count,
        draw = ?kind_of_draw,
        "Drawing raw engine output"
    );

    let values = draw(&mut engine, kind_of_draw, count);
    write_values(out, &values, format)
}
