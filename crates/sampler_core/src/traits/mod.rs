//! Core traits for samplers.
//!
//! This module defines the abstractions the distribution layer is written
//! against:
//! - Sample production (`Generator` trait)
//! - Acceptance envelopes (`ProbabilityFunction` trait)
//! - Generic floating-point operations (`Float` re-export)
//!
//! The uniform-draw capability itself lives in [`crate::iid`].

pub use num_traits::Float;

pub mod generator;
pub mod probability;

pub use generator::Generator;
pub use probability::ProbabilityFunction;
