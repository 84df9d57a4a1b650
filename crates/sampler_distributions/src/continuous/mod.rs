//! Continuous distributions returning `f32` samples.
//!
//! | Module | Distribution | Setup |
//! |--------|--------------|-------|
//! | [`normal`] | Normal (Marsaglia polar) | spare deviate |
//! | [`gamma`] | Gamma (Marsaglia–Tsang) | [`GammaSetup`] |
//! | [`bates`] | Bates | [`BatesSetup`] |
//! | [`uniform`] | Uniform | none |
//! | [`acceptance_rejection`] | Envelope sampling, two sources | none |
//! | [`rejection`] | Envelope sampling, one source | none |
//!
//! Every module exposes a free `generate` function generic over
//! [`IidSource`](sampler_core::iid::IidSource) and a generator struct that
//! owns its source.

pub mod acceptance_rejection;
pub mod bates;
pub mod gamma;
pub mod normal;
pub mod rejection;
pub mod uniform;

pub use acceptance_rejection::AcceptanceRejectionGenerator;
pub use bates::{BatesGenerator, BatesParams, BatesSetup};
pub use gamma::{GammaGenerator, GammaParams, GammaSetup};
pub use normal::{NormalGenerator, NormalParams, SpareNormal, NORMAL_EPSILON};
pub use rejection::{RejectionGenerator, RejectionParams};
pub use uniform::{UniformGenerator, UniformParams};
