//! Discrete distributions.
//!
//! Counting distributions ([`binomial`], [`negative_binomial`],
//! [`geometric`], [`poisson`]) return `i32` and take a `start_point` added
//! after generation. [`weighted`] and [`filtered`] work over arbitrary
//! value types.

pub mod binomial;
pub mod filtered;
pub mod geometric;
pub mod negative_binomial;
pub mod poisson;
pub mod weighted;

pub use binomial::{BinomialGenerator, BinomialParams, BinomialSetup};
pub use filtered::{Exclude, Filter, Filtered, NoRecent, NoRepeat};
pub use geometric::{GeometricGenerator, GeometricParams, GeometricSetup};
pub use negative_binomial::{NegativeBinomialGenerator, NegativeBinomialParams};
pub use poisson::{
    PoissonGenerator, PoissonParams, PoissonSetup, POISSON_MAX_LAMBDA, POISSON_STEP,
};
pub use weighted::{WeightedGenerator, WeightedTable};
