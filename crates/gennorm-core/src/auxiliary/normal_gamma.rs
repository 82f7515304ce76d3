//! Normal-gamma shrinkage variances.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use super::{gig, inverse_gamma};
use crate::constants::NORMAL_GAMMA_TOLERANCE;
use crate::error::{GennormError, Result};
use crate::math;
use crate::types::Vector;

/// Fixed hyperparameters of the normal-gamma prior.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalGammaPrior {
    /// Candidate values of the shape `a`, used when `hyper` is set.
    pub shape_grid: Vec<f64>,
    /// Shape ϱ₀ of the inverse-gamma prior on the global variance.
    pub global_shape: f64,
    /// Rate ϱ₁ of the inverse-gamma prior on the global variance.
    pub global_rate: f64,
    /// Resample `a` from `shape_grid` on every pass.
    pub hyper: bool,
    /// Floor on each local variance's share of the total. Zero disables it.
    pub tolerance: f64,
}

impl NormalGammaPrior {
    /// Prior with a fixed shape and the default tolerance.
    pub fn new(global_shape: f64, global_rate: f64) -> Self {
        Self {
            shape_grid: Vec::new(),
            global_shape,
            global_rate,
            hyper: false,
            tolerance: NORMAL_GAMMA_TOLERANCE,
        }
    }

    /// Resample the shape over `grid` on every pass.
    pub fn with_shape_grid(mut self, grid: Vec<f64>) -> Self {
        self.shape_grid = grid;
        self.hyper = true;
        self
    }

    /// Set the share floor.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// State of the normal-gamma hierarchy for one block of coefficients.
///
/// ```text
/// x_j | θ̃_j     ~ N(0, θ̃_j)
/// θ̃_j | a, ζ    ~ Gamma(a, scale 2ζ/a)
/// ζ             ~ IG(ϱ₀, ϱ₁)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NormalGammaState {
    /// Local variances θ̃.
    pub local: Vector,
    /// Global variance ζ.
    pub global: f64,
    /// Current shape a.
    pub shape: f64,
}

impl NormalGammaState {
    /// Start with unit variances and the given shape.
    pub fn new(n: usize, shape: f64) -> Self {
        Self {
            local: Vector::from_element(n, 1.0),
            global: 1.0,
            shape,
        }
    }

    /// One Gibbs pass over the hierarchy given coefficients `x`.
    ///
    /// Updates the state and returns the new local variances. The state is
    /// left unchanged on error.
    ///
    /// # Errors
    ///
    /// - [`GennormError::InvalidShape`] if `x` does not match the state.
    /// - [`GennormError::InvalidParameter`] for an invalid GIG or gamma
    ///   parameter, an empty grid with `hyper` set, or non-finite grid
    ///   weights.
    pub fn sample_variances<R: Rng + ?Sized>(
        &mut self,
        x: &Vector,
        prior: &NormalGammaPrior,
        rng: &mut R,
    ) -> Result<Vector> {
        let n = self.local.len();
        if x.len() != n {
            return Err(GennormError::InvalidShape {
                what: "normal-gamma coefficients",
                expected: (n, 1),
                actual: (x.len(), 1),
            });
        }
        if prior.hyper && prior.shape_grid.is_empty() {
            return Err(GennormError::InvalidParameter {
                name: "shape grid length",
                value: 0.0,
            });
        }

        let a = self.shape;
        let mut local = Vector::zeros(n);
        let mut log_weights = vec![0.0; prior.shape_grid.len()];
        for j in 0..n {
            local[j] = gig(a - 0.5, math::sq(x[j]), a / self.global, rng)?;
            if prior.hyper {
                for (weight, &g) in log_weights.iter_mut().zip(&prior.shape_grid) {
                    *weight += math::gamma_ln_pdf(local[j], g, 2.0 * self.global / g);
                }
            }
        }

        if prior.tolerance > 0.0 {
            let total = local.sum();
            for v in local.iter_mut() {
                let share = *v / total;
                *v = share.max(prior.tolerance) * total;
            }
        }

        let global = inverse_gamma(
            prior.global_shape + a * n as f64,
            prior.global_rate + 0.5 * a * local.sum(),
            "normal-gamma global rate",
            rng,
        )?;

        let shape = if prior.hyper {
            let index = sample_categorical(&softmax(&log_weights)?, rng);
            prior.shape_grid[index]
        } else {
            a
        };

        self.local = local.clone();
        self.global = global;
        self.shape = shape;
        Ok(local)
    }
}

/// Normalized `exp(w − max w)`.
fn softmax(log_weights: &[f64]) -> Result<Vec<f64>> {
    let max = log_weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let unnormalized: Vec<f64> = log_weights.iter().map(|&w| math::exp(w - max)).collect();
    let total: f64 = unnormalized.iter().sum();

    let weights: Vec<f64> = unnormalized.iter().map(|&w| w / total).collect();
    if let Some(&bad) = weights.iter().find(|w| !w.is_finite()) {
        return Err(GennormError::InvalidParameter {
            name: "shape grid weight",
            value: bad,
        });
    }
    if total == 0.0 {
        return Err(GennormError::InvalidParameter {
            name: "shape grid weight sum",
            value: total,
        });
    }
    Ok(weights)
}

/// Index drawn with probabilities `weights`, which sum to one.
fn sample_categorical<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if u < cumulative {
            return i;
        }
    }
    // Rounding can leave the total just below one.
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
}
