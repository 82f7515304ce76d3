//! Whitening factors of the restricted row precisions.

use nalgebra::Cholesky;

use crate::error::{GennormError, Result};
use crate::types::Matrix;

/// Symmetrize a square matrix as `(M + Mᵀ) / 2`.
///
/// Absorbs the floating-point asymmetry of products like `V S Vᵀ` before
/// they are factored.
pub fn symmetrize(m: &Matrix) -> Matrix {
    (m + m.transpose()) * 0.5
}

/// Upper-triangular whitening factor `U` of one row's restricted precision.
///
/// With `P = sym(V S Vᵀ)` the precision of the restricted coefficients,
/// returns the `r × r` upper-triangular `U` satisfying
///
/// ```text
/// Uᵀ U = post_nu · P⁻¹
/// ```
///
/// so that `Uᵀ U / post_nu` is the restricted covariance of the row.
///
/// # Errors
///
/// [`GennormError::NonPositiveDefinite`] tagged with `row` if either
/// factorization fails, which happens when `V` is rank deficient or `S` is
/// not positive definite on the span of `V`.
pub fn whitening_factor(
    basis: &Matrix,
    precision: &Matrix,
    post_nu: f64,
    row: usize,
) -> Result<Matrix> {
    let restricted = symmetrize(&(basis * precision * basis.transpose()));
    let restricted_chol =
        Cholesky::new(restricted).ok_or(GennormError::NonPositiveDefinite { row })?;

    let covariance = symmetrize(&(restricted_chol.inverse() * post_nu));
    let covariance_chol =
        Cholesky::new(covariance).ok_or(GennormError::NonPositiveDefinite { row })?;

    // Cholesky gives L with L Lᵀ = C; U = Lᵀ satisfies Uᵀ U = C
    Ok(covariance_chol.l().transpose())
}
