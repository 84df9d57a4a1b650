//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParameterError`: Precondition violations caught by `try_*` constructors
//! - `CurveError`: Errors from probability curve construction

use thiserror::Error;

/// Precondition violations for engines and distribution parameters.
///
/// Hot sampling paths never return this type; it is produced by the
/// validating constructors (`try_new`, `from_state`, `validate`) so that
/// collaborators loading parameters from configuration can reject bad
/// values before any draw happens.
///
/// # Examples
/// ```
/// use sampler_core::types::ParameterError;
///
/// let err = ParameterError::ZeroState { engine: "XorShift32" };
/// assert_eq!(
///     format!("{}", err),
///     "XorShift32 state must contain at least one non-zero word"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParameterError {
    /// All-zero engine state (a fixed point of every xorshift recurrence).
    #[error("{engine} state must contain at least one non-zero word")]
    ZeroState {
        /// Engine type name
        engine: &'static str,
    },

    /// Parameter outside its valid domain.
    #[error("Parameter '{name}' = {value} is out of range: expected {expected}")]
    OutOfRange {
        /// Parameter name
        name: &'static str,
        /// Supplied value
        value: f64,
        /// Human readable description of the valid domain
        expected: &'static str,
    },

    /// Parameter is NaN or infinite.
    #[error("Parameter '{name}' must be finite")]
    NonFinite {
        /// Parameter name
        name: &'static str,
    },

    /// Range bounds in the wrong order.
    #[error("Invalid range: min {min} is greater than max {max}")]
    InvalidRange {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Parallel arrays of different lengths.
    #[error("Length mismatch: {values} values but {weights} weights")]
    LengthMismatch {
        /// Number of values
        values: usize,
        /// Number of weights
        weights: usize,
    },

    /// A collection that must hold at least one element is empty.
    #[error("'{0}' must not be empty")]
    Empty(&'static str),

    /// Every weight is zero, so no entry is reachable.
    #[error("Total weight is zero: at least one entry must have a positive weight")]
    ZeroTotalWeight,
}

impl ParameterError {
    /// Checks that `value` is finite, returning `NonFinite` otherwise.
    pub fn ensure_finite(name: &'static str, value: f64) -> Result<(), Self> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(Self::NonFinite { name })
        }
    }

    /// Checks that `value` is finite and strictly positive.
    pub fn ensure_positive(name: &'static str, value: f64) -> Result<(), Self> {
        Self::ensure_finite(name, value)?;
        if value > 0.0 {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                name,
                value,
                expected: "> 0",
            })
        }
    }

    /// Checks that `value` is a probability in `[0, 1]`.
    pub fn ensure_probability(name: &'static str, value: f64) -> Result<(), Self> {
        Self::ensure_finite(name, value)?;
        if (0.0..=1.0).contains(&value) {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                name,
                value,
                expected: "in [0, 1]",
            })
        }
    }

    /// Checks that `min <= max` and both bounds are finite.
    pub fn ensure_range(min: f64, max: f64) -> Result<(), Self> {
        Self::ensure_finite("min", min)?;
        Self::ensure_finite("max", max)?;
        if min <= max {
            Ok(())
        } else {
            Err(Self::InvalidRange { min, max })
        }
    }
}

/// Probability curve construction errors.
///
/// # Examples
/// ```
/// use sampler_core::types::CurveError;
///
/// let err = CurveError::InsufficientKnots { got: 1, need: 2 };
/// assert!(format!("{}", err).contains("need at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveError {
    /// Not enough knots to define a segment.
    #[error("Insufficient knots: got {got}, need at least {need}")]
    InsufficientKnots {
        /// Number of knots provided
        got: usize,
        /// Minimum number of knots required
        need: usize,
    },

    /// x and y slices of different lengths.
    #[error("xs and ys must have same length: got {xs} and {ys}")]
    LengthMismatch {
        /// Number of x-coordinates
        xs: usize,
        /// Number of y-values
        ys: usize,
    },

    /// A knot coordinate is NaN or infinite.
    #[error("Knot {index} is not finite")]
    NonFiniteKnot {
        /// Index of the offending knot
        index: usize,
    },

    /// Two knots share the same x-coordinate.
    #[error("Duplicate knot at x = {x}")]
    DuplicateKnot {
        /// The repeated x-coordinate
        x: f64,
    },
}
