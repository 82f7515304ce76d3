//! Orthogonal complement of a column space.

use nalgebra::QR;

use crate::types::Matrix;

/// Basis of the orthogonal complement of the column space of `a`.
///
/// For an `m × n` matrix with `m > n` and full column rank, returns an
/// `m × (m - n)` matrix `O` with orthonormal columns such that `aᵀ O ≈ 0`
/// and `[a | O]` is non-singular. The result is the trailing `m - n` columns
/// of the full orthogonal factor of a Householder QR of `a`.
///
/// When `n = 0` the complement is the whole space and the identity is
/// returned.
///
/// Rank is not validated: a rank-deficient `a` yields a numerically
/// meaningless basis. Callers guarantee `m > n` and full column rank.
pub fn orthogonal_complement(a: &Matrix) -> Matrix {
    let (m, n) = a.shape();
    debug_assert!(m > n, "orthogonal_complement needs more rows than columns");

    if n == 0 {
        return Matrix::identity(m, m);
    }

    // Applying the Householder reflectors to I_m yields Qᵀ for the full m×m
    // orthogonal factor; `QR::q()` alone only returns the thin m×n part.
    let qr = QR::new(a.clone());
    let mut q_t = Matrix::identity(m, m);
    qr.q_tr_mul(&mut q_t);

    q_t.rows(n, m - n).transpose()
}
