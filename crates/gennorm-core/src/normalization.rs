//! Sign normalization of structural-matrix draws.
//!
//! Multiplying any row of `B` by −1 leaves the implied covariance
//! `(BᵀB)⁻¹` unchanged, so every draw is only identified up to a sign
//! pattern `s ∈ {−1, +1}^N`. Each draw is replaced by `diag(s) · B` for the
//! pattern minimizing
//!
//! ```text
//! d(s) = Σₙ (inv(diag(s)·B)[:, n] − R⁻¹[:, n])ᵀ · RᵀR · (inv(diag(s)·B)[:, n] − R⁻¹[:, n])
//! ```
//!
//! over all 2^N patterns, where `R` is the reference matrix. Candidates are
//! scanned in [`SignTable`] order and the first strict minimum wins.

use alloc::vec::Vec;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constants::MAX_SIGN_DIMENSION;
use crate::error::{GennormError, Result};
use crate::types::{Matrix, Vector};

/// One row-sign pattern together with its position in the [`SignTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct SignPattern {
    index: usize,
    signs: Vec<f64>,
}

impl SignPattern {
    /// Position of the pattern in the enumeration.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Entries of the pattern, each `+1.0` or `−1.0`.
    pub fn signs(&self) -> &[f64] {
        &self.signs
    }

    /// True if the pattern changes nothing.
    pub fn is_identity(&self) -> bool {
        self.signs.iter().all(|&s| s > 0.0)
    }

    /// Apply `diag(signs) · matrix` in place.
    pub fn apply(&self, matrix: &mut Matrix) {
        for (i, &s) in self.signs.iter().enumerate() {
            if s < 0.0 {
                let mut row = matrix.row_mut(i);
                row *= -1.0;
            }
        }
    }
}

/// Materialized table of all 2^N sign patterns.
///
/// Built once per normalization call by Kronecker products: column `n` is
///
/// ```text
/// 1_{2^n} ⊗ [−1, +1]ᵀ ⊗ 1_{2^(N−1−n)}
/// ```
///
/// so row `k` holds `+1` in column `n` exactly when bit `N−1−n` of `k` is
/// set. Row 0 is all `−1`, the last row all `+1`.
#[derive(Debug, Clone, PartialEq)]
pub struct SignTable {
    table: Matrix,
}

impl SignTable {
    /// Build the table for dimension `dimension`.
    ///
    /// # Errors
    ///
    /// [`GennormError::DimensionTooLarge`] above [`MAX_SIGN_DIMENSION`] and
    /// [`GennormError::InvalidShape`] for dimension zero.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(GennormError::InvalidShape {
                what: "sign table",
                expected: (1, 1),
                actual: (0, 0),
            });
        }
        if dimension > MAX_SIGN_DIMENSION {
            return Err(GennormError::DimensionTooLarge {
                dimension,
                max: MAX_SIGN_DIMENSION,
            });
        }

        let minus_plus = Vector::from_column_slice(&[-1.0, 1.0]);
        let mut table = Matrix::zeros(1 << dimension, dimension);
        for n in 0..dimension {
            let outer = Vector::from_element(1 << n, 1.0);
            let inner = Vector::from_element(1 << (dimension - 1 - n), 1.0);
            table.set_column(n, &outer.kronecker(&minus_plus.kronecker(&inner)));
        }
        Ok(Self { table })
    }

    /// Number of patterns, 2^N.
    pub fn len(&self) -> usize {
        self.table.nrows()
    }

    /// Always false: a table holds at least two patterns.
    pub fn is_empty(&self) -> bool {
        self.table.nrows() == 0
    }

    /// Dimension N.
    pub fn dimension(&self) -> usize {
        self.table.ncols()
    }

    /// Sign of row `n` under pattern `k`.
    #[inline]
    pub fn sign(&self, k: usize, n: usize) -> f64 {
        self.table[(k, n)]
    }

    /// Pattern `k` as an owned [`SignPattern`].
    pub fn pattern(&self, k: usize) -> SignPattern {
        SignPattern {
            index: k,
            signs: self.table.row(k).iter().copied().collect(),
        }
    }

    /// Index of the all-`+1` pattern.
    pub fn identity_index(&self) -> usize {
        self.len() - 1
    }
}

/// Reference matrix derived from a draw: `diag(sign(diag(x))) · x`.
///
/// Rows with a negative diagonal entry are negated, so the reference has a
/// non-negative diagonal. A zero diagonal entry keeps its row unchanged.
pub fn reference_from_draw(x: &Matrix) -> Matrix {
    let mut reference = x.clone();
    for i in 0..reference.nrows().min(reference.ncols()) {
        if reference[(i, i)] < 0.0 {
            let mut row = reference.row_mut(i);
            row *= -1.0;
        }
    }
    reference
}

/// Sign search against one fixed reference matrix.
///
/// Holds the pattern table, `R⁻¹` and the metric `RᵀR`, all computed once
/// and shared by every draw and every candidate pattern.
#[derive(Debug, Clone)]
pub struct SignNormalizer {
    table: SignTable,
    reference_inverse: Matrix,
    metric: Matrix,
}

impl SignNormalizer {
    /// Prepare the search for `reference`.
    ///
    /// # Errors
    ///
    /// - [`GennormError::InvalidShape`] if `reference` is not square.
    /// - [`GennormError::SingularReference`] if it is not invertible.
    /// - Any [`SignTable::new`] error.
    pub fn new(reference: &Matrix) -> Result<Self> {
        let (rows, cols) = reference.shape();
        if rows != cols {
            return Err(GennormError::InvalidShape {
                what: "reference matrix",
                expected: (rows, rows),
                actual: (rows, cols),
            });
        }
        let table = SignTable::new(rows)?;
        let reference_inverse = reference
            .clone()
            .try_inverse()
            .ok_or(GennormError::SingularReference)?;
        let metric = reference.transpose() * reference;

        Ok(Self {
            table,
            reference_inverse,
            metric,
        })
    }

    /// The pattern table in use.
    pub fn table(&self) -> &SignTable {
        &self.table
    }

    /// Distance `d(s)` of `diag(s) · draw` to the reference, computed directly.
    ///
    /// # Errors
    ///
    /// [`GennormError::SingularDraw`] (with index 0) if the flipped draw is
    /// singular; [`GennormError::InvalidShape`] on a dimension mismatch.
    pub fn distance(&self, draw: &Matrix, pattern: &SignPattern) -> Result<f64> {
        self.check_shape(draw)?;
        let mut flipped = draw.clone();
        pattern.apply(&mut flipped);
        let inverse = flipped
            .try_inverse()
            .ok_or(GennormError::SingularDraw { index: 0 })?;

        let diff = inverse - &self.reference_inverse;
        Ok(diff
            .column_iter()
            .map(|col| col.dot(&(&self.metric * &col)))
            .sum())
    }

    /// Index of the minimizing pattern for `draw` (the draw at `index`).
    ///
    /// Since `inv(diag(s)·B) = inv(B)·diag(s)`, column `n` contributes one
    /// of two quadratic forms depending on `s[n]`. Both are computed once per
    /// draw; the 2^N candidates are then scanned in table order.
    fn best_index(&self, index: usize, draw: &Matrix) -> Result<usize> {
        self.check_shape(draw)?;
        let inverse = draw
            .clone()
            .try_inverse()
            .ok_or(GennormError::SingularDraw { index })?;

        let dimension = self.table.dimension();
        let mut cost_plus = Vec::with_capacity(dimension);
        let mut cost_minus = Vec::with_capacity(dimension);
        for n in 0..dimension {
            let column = inverse.column(n).into_owned();
            let target = self.reference_inverse.column(n);

            let plus = &column - &target;
            let minus = -&column - &target;
            cost_plus.push(plus.dot(&(&self.metric * &plus)));
            cost_minus.push(minus.dot(&(&self.metric * &minus)));
        }

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for k in 0..self.table.len() {
            let distance: f64 = (0..dimension)
                .map(|n| {
                    if self.table.sign(k, n) > 0.0 {
                        cost_plus[n]
                    } else {
                        cost_minus[n]
                    }
                })
                .sum();
            if distance < best_distance {
                best = k;
                best_distance = distance;
            }
        }
        Ok(best)
    }

    /// Minimizing pattern for one draw.
    pub fn select(&self, index: usize, draw: &Matrix) -> Result<SignPattern> {
        self.best_index(index, draw).map(|k| self.table.pattern(k))
    }

    /// Normalize `draws` in place, returning the pattern applied to each.
    ///
    /// Every pattern is selected before any draw is modified, so on error the
    /// draws are left untouched.
    pub fn normalize(&self, draws: &mut [Matrix]) -> Result<Vec<SignPattern>> {
        #[cfg(feature = "parallel")]
        let selected: Vec<usize> = draws
            .par_iter()
            .enumerate()
            .map(|(i, draw)| self.best_index(i, draw))
            .collect::<Result<Vec<_>>>()?;

        #[cfg(not(feature = "parallel"))]
        let selected: Vec<usize> = draws
            .iter()
            .enumerate()
            .map(|(i, draw)| self.best_index(i, draw))
            .collect::<Result<Vec<_>>>()?;

        let patterns: Vec<SignPattern> = selected.iter().map(|&k| self.table.pattern(k)).collect();
        for (draw, pattern) in draws.iter_mut().zip(&patterns) {
            pattern.apply(draw);
        }
        Ok(patterns)
    }

    fn check_shape(&self, draw: &Matrix) -> Result<()> {
        let n = self.table.dimension();
        if draw.shape() != (n, n) {
            return Err(GennormError::InvalidShape {
                what: "draw",
                expected: (n, n),
                actual: draw.shape(),
            });
        }
        Ok(())
    }
}

/// Sign-normalize `draws` in place against `reference`.
///
/// Returns the pattern applied to each draw, in draw order. Nothing is
/// modified if an error is returned.
///
/// # Errors
///
/// [`GennormError::SingularReference`] if `reference` is not invertible,
/// [`GennormError::SingularDraw`] if a draw is not,
/// [`GennormError::DimensionTooLarge`] above [`MAX_SIGN_DIMENSION`], and
/// [`GennormError::InvalidShape`] on dimension mismatches.
pub fn normalize_signs(draws: &mut [Matrix], reference: &Matrix) -> Result<Vec<SignPattern>> {
    SignNormalizer::new(reference)?.normalize(draws)
}
