//! Main `Sampler` entry point.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use gennorm_core::{counter_rng_seed, reference_from_draw, DrawDriver, GennormError};

use crate::config::{Config, ReferenceMatrix};
use crate::error::SamplerError;
use crate::model::StructuralModel;
use crate::result::{NormalizationPolicy, Posterior};

/// Runs the row-wise Gibbs sweep over a [`StructuralModel`].
///
/// # Example
///
/// ```ignore
/// use gennorm::{Config, Sampler, StructuralModel};
///
/// let model = StructuralModel::unrestricted(2, 10.0)?;
/// let posterior = Sampler::with_config(Config::new().draws(500).seed(1)).run(&model)?;
/// assert!(posterior.normalized);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sampler {
    config: Config,
}

impl Sampler {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one chain seeded from [`Config::seed`].
    ///
    /// Runs `burn_in` sweeps and discards them, keeps the next `draws`
    /// sweeps, then applies sign normalization under the configured policy.
    ///
    /// # Errors
    ///
    /// [`SamplerError::InvalidConfig`] if validation fails, and
    /// [`SamplerError::Model`] for invalid model inputs or, under
    /// [`NormalizationPolicy::FailClosed`], a failed normalization.
    pub fn run(&self, model: &StructuralModel) -> Result<Posterior, SamplerError> {
        self.config.validate().map_err(SamplerError::InvalidConfig)?;
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.config.seed);
        self.run_with_rng(model, self.config.seed, &mut rng)
    }

    /// Run `chains` independent chains.
    ///
    /// Chain `k` uses the sub-stream `counter_rng_seed(seed, k)`, so results
    /// do not depend on how many chains are requested.
    pub fn run_chains(
        &self,
        model: &StructuralModel,
        chains: usize,
    ) -> Result<Vec<Posterior>, SamplerError> {
        self.config.validate().map_err(SamplerError::InvalidConfig)?;
        (0..chains as u64)
            .map(|k| {
                let seed = counter_rng_seed(self.config.seed, k);
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                self.run_with_rng(model, seed, &mut rng)
            })
            .collect()
    }

    fn run_with_rng<R: Rng + ?Sized>(
        &self,
        model: &StructuralModel,
        seed: u64,
        rng: &mut R,
    ) -> Result<Posterior, SamplerError> {
        let config = &self.config;
        tracing::debug!(
            dimension = model.dimension(),
            degrees_of_freedom = model.degrees_of_freedom(),
            draws = config.draws,
            burn_in = config.burn_in,
            seed,
            "starting sampler"
        );

        if let ReferenceMatrix::Fixed(reference) = &config.reference {
            let n = model.dimension();
            if reference.shape() != (n, n) {
                return Err(GennormError::InvalidShape {
                    what: "reference matrix",
                    expected: (n, n),
                    actual: reference.shape(),
                }
                .into());
            }
        }

        let mut driver = DrawDriver::new(
            model.initial(),
            model.precision(),
            model.degrees_of_freedom(),
            model.restrictions(),
        )?;

        for _ in 0..config.burn_in {
            driver.sweep(rng);
        }
        tracing::debug!(sweeps = driver.sweeps(), "burn-in complete");

        let mut draws = driver.run(config.draws, rng);

        let reference = match &config.reference {
            ReferenceMatrix::LastDraw => reference_from_draw(driver.state()),
            ReferenceMatrix::Fixed(reference) => reference.clone(),
        };

        let (sign_patterns, normalized) = if config.normalise && !draws.is_empty() {
            match draws.normalize(&reference) {
                Ok(patterns) => (patterns, true),
                Err(err) => match config.normalization_policy {
                    NormalizationPolicy::FailClosed => return Err(err.into()),
                    NormalizationPolicy::FailOpen => {
                        tracing::warn!(
                            error = %err,
                            "Sign normalization failed; returning unnormalized draws"
                        );
                        (Vec::new(), false)
                    }
                },
            }
        } else {
            (Vec::new(), false)
        };

        tracing::info!(
            draws = draws.len(),
            normalized,
            flipped = sign_patterns.iter().filter(|p| !p.is_identity()).count(),
            "sampling complete"
        );

        Ok(Posterior {
            draws,
            sign_patterns,
            reference,
            seed,
            normalized,
        })
    }
}
