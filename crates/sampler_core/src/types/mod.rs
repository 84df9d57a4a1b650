//! Shared value types.
//!
//! Error types live here so both the engines and the distribution layer can
//! report precondition violations with the same vocabulary.

pub mod error;

pub use error::{CurveError, ParameterError};
