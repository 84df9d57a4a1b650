//! Numerical helpers for samplers.
//!
//! - [`LinearCurve`]: piecewise linear curve generic over `T: Float`
//! - [`ProbabilityCurve`]: `[0, 1]`-clamped curve used as an acceptance envelope

mod curve;

pub use curve::{LinearCurve, ProbabilityCurve};
