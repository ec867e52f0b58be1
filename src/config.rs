//! Settings shared by a series of integrations, and an integrator object that owns them together
//! with its random number generator.
use crate::core::error::IntegrationError;
use crate::core::{ExecutionContext, Integrand};
use crate::integrators::{plain, scalar};

use ndarray::{ArrayBase, Data, Dimension};
use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The sample size, execution context and seed of an integration.
///
/// Settings can be read from JSON, where only `samples` is mandatory:
///
/// ```
/// use boxmc::config::Settings;
/// use boxmc::ExecutionContext;
///
/// let settings = Settings::from_json(
///     r#"{ "samples": 1000000, "context": { "parallel": { "threads": 4 } }, "seed": 42 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(settings.samples(), 1_000_000);
/// assert_eq!(settings.context(), ExecutionContext::Parallel { threads: 4 });
/// assert_eq!(settings.seed(), Some(42));
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Settings {
    samples: usize,
    #[serde(default)]
    context: ExecutionContext,
    #[serde(default)]
    seed: Option<u64>,
}

impl Settings {
    /// Settings for `samples` points per integration, running sequentially with the default
    /// random stream.
    pub const fn new(samples: usize) -> Self {
        Self {
            samples,
            context: ExecutionContext::Sequential,
            seed: None,
        }
    }

    /// Run the array operations in `context`.
    pub fn with_context(self, context: ExecutionContext) -> Self {
        Self { context, ..self }
    }

    /// Seed the random number generator with `seed`.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Parse settings from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns the error of `serde_json` if `json` does not describe valid settings.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the number of samples per integration.
    pub const fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the execution context.
    pub const fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Returns the seed, if any.
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Create the random number generator these settings describe. Without a seed a fixed default
    /// stream is used, so that results are always reproducible.
    pub fn rng(&self) -> Pcg64 {
        match self.seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96),
        }
    }
}

/// Performs integrations with fixed [`Settings`], drawing all random numbers from one generator.
///
/// Successive integrations continue the random stream where the previous one stopped.
#[derive(Clone, Debug)]
pub struct Integrator<R = Pcg64> {
    settings: Settings,
    rng: R,
}

impl Integrator<Pcg64> {
    /// Create an integrator with the generator described by `settings`.
    pub fn new(settings: Settings) -> Self {
        let rng = settings.rng();
        Self { settings, rng }
    }
}

impl<R> Integrator<R>
where
    R: Clone + Rng + Send,
{
    /// Create an integrator that draws from `rng`, ignoring the seed in `settings`.
    pub fn with_rng(settings: Settings, rng: R) -> Self {
        Self { settings, rng }
    }

    /// Returns the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the current state of the random number generator.
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Integrate over the box from `lower` to `upper`, see [`plain::integrate`].
    ///
    /// # Errors
    ///
    /// See [`plain::integrate`].
    pub fn integrate<T, S1, D1, S2, D2, I>(
        &mut self,
        integrand: &I,
        lower: &ArrayBase<S1, D1>,
        upper: &ArrayBase<S2, D2>,
    ) -> Result<T, IntegrationError>
    where
        T: Debug + Float + FromPrimitive + Send + Sync,
        S1: Data<Elem = T>,
        S2: Data<Elem = T>,
        D1: Dimension,
        D2: Dimension,
        I: Integrand<T>,
        Standard: Distribution<T>,
    {
        plain::integrate(
            integrand,
            lower,
            upper,
            self.settings.samples,
            self.settings.context,
            &mut self.rng,
        )
    }

    /// Integrate from `lower` to `upper` in one dimension, see [`scalar::integrate`].
    ///
    /// # Errors
    ///
    /// See [`plain::integrate`].
    pub fn integrate_1d<T, I>(
        &mut self,
        integrand: &I,
        lower: T,
        upper: T,
    ) -> Result<T, IntegrationError>
    where
        T: Debug + Float + FromPrimitive + Send + Sync,
        I: Integrand<T>,
        Standard: Distribution<T>,
    {
        scalar::integrate(
            integrand,
            lower,
            upper,
            self.settings.samples,
            self.settings.context,
            &mut self.rng,
        )
    }
}
