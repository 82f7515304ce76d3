//! Configuration for a sampler run.

use gennorm_core::constants::DEFAULT_SEED;
use gennorm_core::Matrix;

use crate::result::NormalizationPolicy;

/// Configuration options for [`Sampler`](crate::Sampler).
#[derive(Debug, Clone)]
pub struct Config {
    // =========================================================================
    // Chain length
    // =========================================================================

    /// Number of sweeps kept as draws.
    ///
    /// Default: 1,000.
    pub draws: usize,

    /// Number of sweeps run and discarded before the first kept draw.
    ///
    /// Default: 100.
    pub burn_in: usize,

    // =========================================================================
    // Sign normalization
    // =========================================================================

    /// Sign-normalize the kept draws.
    ///
    /// Default: true.
    pub normalise: bool,

    /// Matrix the draws are normalized against.
    ///
    /// Default: [`ReferenceMatrix::LastDraw`].
    pub reference: ReferenceMatrix,

    /// What to do when normalization fails.
    ///
    /// Default: [`NormalizationPolicy::FailClosed`].
    pub normalization_policy: NormalizationPolicy,

    // =========================================================================
    // Reproducibility
    // =========================================================================

    /// Seed of the random stream. Same seed and model give identical draws.
    ///
    /// Default: [`DEFAULT_SEED`].
    pub seed: u64,
}

/// Source of the reference matrix for sign normalization.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReferenceMatrix {
    /// The final draw with every row flipped to a non-negative diagonal.
    #[default]
    LastDraw,

    /// A caller-supplied matrix, e.g. a posterior mode.
    Fixed(Matrix),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            draws: 1_000,
            burn_in: 100,
            normalise: true,
            reference: ReferenceMatrix::LastDraw,
            normalization_policy: NormalizationPolicy::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl Config {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Short chain for smoke tests and examples.
    pub fn quick() -> Self {
        Self {
            draws: 200,
            burn_in: 20,
            ..Default::default()
        }
    }

    /// Long chain for production estimates.
    pub fn thorough() -> Self {
        Self {
            draws: 10_000,
            burn_in: 1_000,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the number of kept draws.
    pub fn draws(mut self, draws: usize) -> Self {
        assert!(draws > 0, "draws must be positive");
        self.draws = draws;
        self
    }

    /// Set the number of discarded burn-in sweeps.
    pub fn burn_in(mut self, sweeps: usize) -> Self {
        self.burn_in = sweeps;
        self
    }

    /// Enable or disable sign normalization.
    pub fn normalise(mut self, normalise: bool) -> Self {
        self.normalise = normalise;
        self
    }

    /// Normalize against a fixed reference matrix.
    pub fn reference(mut self, reference: Matrix) -> Self {
        self.reference = ReferenceMatrix::Fixed(reference);
        self
    }

    /// Set the policy for normalization failures.
    pub fn normalization_policy(mut self, policy: NormalizationPolicy) -> Self {
        self.normalization_policy = policy;
        self
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration for invalid values.
    pub fn validate(&self) -> Result<(), String> {
        if self.draws == 0 {
            return Err("draws must be positive".to_string());
        }
        if let ReferenceMatrix::Fixed(reference) = &self.reference {
            if !reference.is_square() {
                return Err(format!(
                    "reference must be square, got {}x{}",
                    reference.nrows(),
                    reference.ncols()
                ));
            }
            if reference.iter().any(|v| !v.is_finite()) {
                return Err("reference must be finite".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.draws, 1_000);
        assert_eq!(config.burn_in, 100);
        assert!(config.normalise);
        assert_eq!(config.reference, ReferenceMatrix::LastDraw);
        assert_eq!(config.normalization_policy, NormalizationPolicy::FailClosed);
        assert_eq!(config.seed, DEFAULT_SEED);
    }

    #[test]
    fn test_presets() {
        let quick = Config::quick();
        let thorough = Config::thorough();
        assert!(quick.draws < Config::new().draws);
        assert!(thorough.draws > Config::new().draws);
        assert!(quick.validate().is_ok());
        assert!(thorough.validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = Config::new()
            .draws(50)
            .burn_in(5)
            .normalise(false)
            .seed(99)
            .normalization_policy(NormalizationPolicy::FailOpen);
        assert_eq!(config.draws, 50);
        assert_eq!(config.burn_in, 5);
        assert!(!config.normalise);
        assert_eq!(config.seed, 99);
        assert_eq!(config.normalization_policy, NormalizationPolicy::FailOpen);
    }

    #[test]
    #[should_panic(expected = "draws must be positive")]
    fn test_zero_draws_builder_panics() {
        let _ = Config::new().draws(0);
    }

    #[test]
    fn test_validate_rejects_bad_reference() {
        let config = Config::new().reference(Matrix::zeros(2, 3));
        assert!(config.validate().unwrap_err().contains("square"));

        let mut reference = Matrix::identity(2, 2);
        reference[(0, 1)] = f64::NAN;
        assert!(Config::new().reference(reference).validate().is_err());
    }
}
