//! Conditional updates that run alongside the structural-matrix sampler.
//!
//! None of these touch `B`. They draw the error-variance scales and the
//! shrinkage variances of the autoregressive coefficients that the
//! surrounding Gibbs sweep conditions on, plus uniformly random rotations
//! for sign-restriction schemes.

mod gig;
mod haar;
mod horseshoe;
mod normal_gamma;
mod scale;

pub use gig::gig;
pub use haar::random_orthogonal;
pub use horseshoe::HorseshoeState;
pub use normal_gamma::{NormalGammaPrior, NormalGammaState};
pub use scale::scale_draw;

use rand::Rng;
use rand_distr::{Distribution, Gamma};

use crate::error::{GennormError, Result};

/// Draw from Gamma(shape, rate).
pub(crate) fn gamma_rate<R: Rng + ?Sized>(
    shape: f64,
    rate: f64,
    name: &'static str,
    rng: &mut R,
) -> Result<f64> {
    if !(shape > 0.0) || !shape.is_finite() {
        return Err(GennormError::InvalidParameter { name, value: shape });
    }
    if !(rate > 0.0) || !rate.is_finite() {
        return Err(GennormError::InvalidParameter { name, value: rate });
    }
    let gamma = Gamma::new(shape, 1.0 / rate)
        .map_err(|_| GennormError::InvalidParameter { name, value: rate })?;
    Ok(gamma.sample(rng))
}

/// Draw from the inverse Gamma law IG(shape, rate), i.e. `1 / Gamma(shape, rate)`.
pub(crate) fn inverse_gamma<R: Rng + ?Sized>(
    shape: f64,
    rate: f64,
    name: &'static str,
    rng: &mut R,
) -> Result<f64> {
    gamma_rate(shape, rate, name, rng).map(|g| 1.0 / g)
}

/// Uniform draw on (0, 1].
#[inline]
pub(crate) fn open_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.random::<f64>()
}
