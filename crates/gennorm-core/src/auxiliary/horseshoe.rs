//! Horseshoe shrinkage variances.

use rand::Rng;

use super::inverse_gamma;
use crate::error::{GennormError, Result};
use crate::math;
use crate::types::Vector;

/// State of the horseshoe hierarchy for one block of coefficients.
///
/// Uses the auxiliary-variable representation of the half-Cauchy priors:
///
/// ```text
/// x_j | θ_j, ζ ~ N(0, θ_j ζ)
/// θ_j | ν_j   ~ IG(½, 1/ν_j),   ν_j ~ IG(½, 1)
/// ζ   | ϖ     ~ IG(½, 1/ϖ),     ϖ   ~ IG(½, 1)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HorseshoeState {
    /// Local variances θ (λ² in the usual notation).
    pub local: Vector,
    /// Global variance ζ (τ²).
    pub global: f64,
    /// Auxiliary variables ν of the local variances.
    pub local_aux: Vector,
    /// Auxiliary variable ϖ of the global variance.
    pub global_aux: f64,
}

impl HorseshoeState {
    /// Start with every variance and auxiliary variable at one.
    pub fn new(n: usize) -> Self {
        Self {
            local: Vector::from_element(n, 1.0),
            global: 1.0,
            local_aux: Vector::from_element(n, 1.0),
            global_aux: 1.0,
        }
    }

    /// Number of coefficients in the block.
    pub fn len(&self) -> usize {
        self.local.len()
    }

    /// True for an empty block.
    pub fn is_empty(&self) -> bool {
        self.local.is_empty()
    }

    /// One Gibbs pass over the hierarchy given coefficients `x`.
    ///
    /// Updates the state and returns the prior variances `θ_j · ζ`. The state
    /// is left unchanged on error.
    ///
    /// # Errors
    ///
    /// [`GennormError::InvalidShape`] if `x` does not match the state length,
    /// [`GennormError::InvalidParameter`] if a conditional rate degenerates
    /// (e.g. a non-finite coefficient).
    pub fn sample_variances<R: Rng + ?Sized>(&mut self, x: &Vector, rng: &mut R) -> Result<Vector> {
        let n = self.len();
        if x.len() != n {
            return Err(GennormError::InvalidShape {
                what: "horseshoe coefficients",
                expected: (n, 1),
                actual: (x.len(), 1),
            });
        }

        let mut local = self.local.clone();
        let mut local_aux = self.local_aux.clone();
        for j in 0..n {
            let rate = 1.0 / local_aux[j] + math::sq(x[j]) / (2.0 * self.global);
            local[j] = inverse_gamma(1.0, rate, "horseshoe local rate", rng)?;
            local_aux[j] = inverse_gamma(1.0, 1.0 + 1.0 / local[j], "horseshoe local aux rate", rng)?;
        }

        let shape = (n as f64 + 1.0) / 2.0;
        let spread: f64 = x.iter().zip(local.iter()).map(|(xj, t)| math::sq(*xj) / t).sum();
        let global = inverse_gamma(
            shape,
            1.0 / self.global_aux + 0.5 * spread,
            "horseshoe global rate",
            rng,
        )?;
        let global_aux = inverse_gamma(1.0, 1.0 + 1.0 / global, "horseshoe global aux rate", rng)?;

        self.local = local;
        self.local_aux = local_aux;
        self.global = global;
        self.global_aux = global_aux;

        Ok(&self.local * self.global)
    }
}
