//! # sampler_distributions (L2: Algorithms)
//!
//! Distribution samplers that turn uniform draws into samples from a target
//! distribution.
//!
//! This crate provides:
//! - Continuous samplers: Normal, Gamma, Bates, Uniform, Acceptance-Rejection, Rejection (`continuous`)
//! - Discrete samplers: Binomial, Negative Binomial, Geometric, Poisson, Weighted, Filtered (`discrete`)
//! - Shared-instance caching with explicit invalidation (`provider`)
//!
//! ## Design Principles
//!
//! - **One algorithm, any source**: every sampler is written once, generic over
//!   [`IidSource`](sampler_core::iid::IidSource), so engines, closures and other
//!   generators plug in unchanged
//! - **Setup values**: parameter-dependent constants are computed by a
//!   constructor-only `*Setup` type and rebuilt only when a parameter changes
//! - **Preconditions**: `new` checks parameters with `debug_assert!`, `try_new`
//!   returns [`ParameterError`](sampler_core::types::ParameterError)
//!
//! ## Usage Examples
//!
//! ```rust
//! use rand::SeedableRng;
//! use sampler_core::engines::Xoroshiro128Plus;
//! use sampler_core::traits::Generator;
//! use sampler_distributions::continuous::GammaGenerator;
//! use sampler_distributions::discrete::PoissonGenerator;
//!
//! let engine = Xoroshiro128Plus::seed_from_u64(11);
//! let mut gamma = GammaGenerator::new(engine.clone(), 2.0, 0.5);
//! assert!(gamma.generate() > 0.0);
//!
//! let mut arrivals = PoissonGenerator::new(engine, 3.0, 0);
//! let counts: Vec<i32> = arrivals.samples().take(5).collect();
//! assert!(counts.iter().all(|&k| k >= 0));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for parameter structs and setups

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod continuous;
pub mod discrete;
pub mod provider;

pub use provider::{GeneratorConfig, Provider};
