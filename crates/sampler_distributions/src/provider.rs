//! Shared generator instances with explicit invalidation.
//!
//! A [`Provider`] owns a configuration, an optional seed and a lazily built
//! generator. [`Provider::shared`] returns the same instance on every call
//! until the configuration changes; [`Provider::create`] always builds a
//! fresh one. Editing through [`Provider::update`] drops the shared
//! instance so the next call rebuilds it from the new parameters.
//!
//! Providers are plain owned values. Callers that need one per thread
//! create one per thread.

use rand::SeedableRng;
use sampler_core::engines::DefaultEngine;
use sampler_core::traits::Generator;
use sampler_core::types::ParameterError;

/// Parameters that know how to build their generator.
pub trait GeneratorConfig {
    /// Sample type of the built generator.
    type Sample;
    /// Generator built from this configuration.
    type Generator: Generator<Self::Sample>;

    /// Checks the parameters. Tables that validate on construction keep the
    /// default.
    fn validate(&self) -> Result<(), ParameterError> {
        Ok(())
    }

    /// Builds a generator drawing from `engine`.
    fn build(&self, engine: DefaultEngine) -> Self::Generator;
}

/// Lazily built shared generator for one configuration.
///
/// # Examples
///
/// ```rust
/// use sampler_core::traits::Generator;
/// use sampler_distributions::continuous::NormalParams;
/// use sampler_distributions::provider::Provider;
///
/// let mut provider = Provider::with_seed(NormalParams::new(0.0, 1.0), 42);
/// let a = provider.shared().generate();
/// let b = provider.shared().generate();
/// assert_ne!(a, b);
///
/// provider.update(|params| params.deviation = 0.0);
/// assert!(!provider.is_cached());
/// assert_eq!(provider.shared().generate(), 0.0);
/// ```
#[derive(Debug)]
pub struct Provider<C: GeneratorConfig> {
    config: C,
    seed: Option<u64>,
    shared: Option<C::Generator>,
}

impl<C: GeneratorConfig> Provider<C> {
    /// Creates a provider whose engines are seeded from system entropy.
    pub fn new(config: C) -> Self {
        Self {
            config,
            seed: None,
            shared: None,
        }
    }

    /// Creates a provider whose engines are seeded from `seed`.
    ///
    /// Every generator it builds starts from the same engine state.
    pub fn with_seed(config: C, seed: u64) -> Self {
        Self {
            config,
            seed: Some(seed),
            shared: None,
        }
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &C {
        &self.config
    }

    /// Returns the seed, if fixed.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Changes the seed and drops the shared instance.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
        self.invalidate();
    }

    /// Edits the configuration in place and drops the shared instance.
    pub fn update<R>(&mut self, edit: impl FnOnce(&mut C) -> R) -> R {
        let result = edit(&mut self.config);
        self.invalidate();
        result
    }

    /// Replaces the configuration and drops the shared instance.
    pub fn set_config(&mut self, config: C) -> C {
        self.invalidate();
        std::mem::replace(&mut self.config, config)
    }

    /// Drops the shared instance.
    #[inline]
    pub fn invalidate(&mut self) {
        self.shared = None;
    }

    /// True if a shared instance is currently built.
    #[inline]
    pub fn is_cached(&self) -> bool {
        self.shared.is_some()
    }

    /// Returns the shared instance, building it on first use.
    pub fn shared(&mut self) -> &mut C::Generator {
        let (config, seed) = (&self.config, self.seed);
        self.shared.get_or_insert_with(|| config.build(engine_for(seed)))
    }

    /// Validates the configuration, then returns the shared instance.
    pub fn try_shared(&mut self) -> Result<&mut C::Generator, ParameterError> {
        self.config.validate()?;
        Ok(self.shared())
    }

    /// Builds a fresh, unshared generator.
    pub fn create(&self) -> C::Generator {
        self.config.build(engine_for(self.seed))
    }

    /// Validates the configuration, then builds a fresh generator.
    pub fn try_create(&self) -> Result<C::Generator, ParameterError> {
        self.config.validate()?;
        Ok(self.create())
    }
}

fn engine_for(seed: Option<u64>) -> DefaultEngine {
    match seed {
        Some(seed) => DefaultEngine::seed_from_u64(seed),
        None => DefaultEngine::from_entropy(),
    }
}

impl<C: GeneratorConfig + Clone> Clone for Provider<C>
where
    C::Generator: Clone,
{
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            seed: self.seed,
            shared: self.shared.clone(),
        }
    }
}
