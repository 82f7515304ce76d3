//! Scaled inverse chi-square draws.

use alloc::vec::Vec;

use rand::Rng;
use rand_distr::{ChiSquared, Distribution};

use crate::error::{GennormError, Result};

/// Draw `n` values of `scale / χ²(shape)`.
///
/// This is the conditional law of an error-variance scale under a
/// scaled-inverse-χ² prior. The mean is `scale / (shape − 2)` for
/// `shape > 2`.
///
/// # Errors
///
/// [`GennormError::InvalidParameter`] unless `scale` and `shape` are finite
/// and strictly positive.
pub fn scale_draw<R: Rng + ?Sized>(
    n: usize,
    scale: f64,
    shape: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(scale > 0.0) || !scale.is_finite() {
        return Err(GennormError::InvalidParameter {
            name: "scale",
            value: scale,
        });
    }
    if !(shape > 0.0) || !shape.is_finite() {
        return Err(GennormError::InvalidParameter {
            name: "shape",
            value: shape,
        });
    }
    let chi2 = ChiSquared::new(shape).map_err(|_| GennormError::InvalidParameter {
        name: "shape",
        value: shape,
    })?;

    Ok((0..n).map(|_| scale / chi2.sample(rng)).collect())
}
