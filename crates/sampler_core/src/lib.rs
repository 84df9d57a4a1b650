//! # sampler_core: Uniform Engines for the Sampling Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! sampler_core serves as the bottom layer of the sampling workspace, providing:
//! - Bit-exact xorshift-family engines (`engines`)
//! - The IID source capability every algorithm is generic over (`iid`)
//! - `Generator` and `ProbabilityFunction` traits (`traits`)
//! - Piecewise linear probability curves (`math`)
//! - Error types: `ParameterError`, `CurveError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other sampler_* crates, with minimal external dependencies:
//! - rand: seeding (`SeedableRng`) and interop (`RngCore`)
//! - rayon: parallel stream filling
//! - num-traits: generic curves
//! - thiserror: error types
//! - serde: serialisation of engine state and curves (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use rand::SeedableRng;
//! use sampler_core::engines::{Engine, Xoroshiro128Plus};
//! use sampler_core::iid::IidSource;
//!
//! let mut engine = Xoroshiro128Plus::seed_from_u64(2024);
//!
//! let u = engine.next_float();
//! assert!((0.0..1.0).contains(&u));
//!
//! let die = engine.next_int_range(1, 7);
//! assert!((1..7).contains(&die));
//!
//! // Engines are IID sources directly
//! let draw = engine.next_iid();
//! assert!((0.0..1.0).contains(&draw));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for engine state, curves and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engines;
pub mod iid;
pub mod math;
pub mod traits;
pub mod types;
