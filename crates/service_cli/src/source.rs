//! Runtime engine selection.
//!
//! The library is generic over the engine; the CLI picks one at run time
//! from [`EngineKind`], so [`AnyEngine`] dispatches over the four engines.

use rand::SeedableRng;
use sampler_core::engines::{Engine, XorShift128, XorShift32, XorShift64, Xoroshiro128Plus};
use sampler_core::iid::IidSource;

use crate::config::EngineKind;

/// One of the four uniform engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyEngine {
    /// 32-bit xorshift
    XorShift32(XorShift32),
    /// 64-bit xorshift
    XorShift64(XorShift64),
    /// 128-bit xorshift
    XorShift128(XorShift128),
    /// xoroshiro128+
    Xoroshiro128Plus(Xoroshiro128Plus),
}

macro_rules! dispatch {
    ($self:expr, $engine:ident => $body:expr) => {
        match $self {
            AnyEngine::XorShift32($engine) => $body,
            AnyEngine::XorShift64($engine) => $body,
            AnyEngine::XorShift128($engine) => $body,
            AnyEngine::Xoroshiro128Plus($engine) => $body,
        }
    };
}

fn seeded<E: SeedableRng>(seed: Option<u64>) -> E {
    match seed {
        Some(seed) => E::seed_from_u64(seed),
        None => E::from_entropy(),
    }
}

impl AnyEngine {
    /// Builds the engine `kind`, seeded from `seed` or from system entropy.
    pub fn new(kind: EngineKind, seed: Option<u64>) -> Self {
        match kind {
            EngineKind::XorShift32 => Self::XorShift32(seeded(seed)),
            EngineKind::XorShift64 => Self::XorShift64(seeded(seed)),
            EngineKind::XorShift128 => Self::XorShift128(seeded(seed)),
            EngineKind::Xoroshiro128Plus => Self::Xoroshiro128Plus(seeded(seed)),
        }
    }

    /// The kind of engine held.
    pub fn kind(&self) -> EngineKind {
        match self {
            Self::XorShift32(_) => EngineKind::XorShift32,
            Self::XorShift64(_) => EngineKind::XorShift64,
            Self::XorShift128(_) => EngineKind::XorShift128,
            Self::Xoroshiro128Plus(_) => EngineKind::Xoroshiro128Plus,
        }
    }

    /// Engine name as reported in output.
    pub fn name(&self) -> &'static str {
        fn name_of<E: Engine>(_: &E) -> &'static str {
            E::NAME
        }
        dispatch!(self, e => name_of(e))
    }

    /// 32 random bits.
    pub fn next_uint(&mut self) -> u32 {
        dispatch!(self, e => e.next_uint())
    }

    /// 64 random bits.
    pub fn next_ulong(&mut self) -> u64 {
        dispatch!(self, e => e.next_ulong())
    }

    /// A float in `[0, 1)`.
    pub fn next_float(&mut self) -> f32 {
        dispatch!(self, e => e.next_float())
    }

    /// A double in `[0, 1)`.
    pub fn next_double(&mut self) -> f64 {
        dispatch!(self, e => e.next_double())
    }
}

impl IidSource for AnyEngine {
    #[inline]
    fn next_iid(&mut self) -> f32 {
        self.next_float()
    }
}
