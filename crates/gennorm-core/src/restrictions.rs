//! Per-row restriction bases and precision matrices.

use alloc::vec::Vec;

use crate::error::{GennormError, Result};
use crate::types::{Matrix, RowVector};

/// One restriction basis per row of the structural matrix.
///
/// Basis `i` is an `r_i × N` matrix whose rows span the admissible values of
/// row `i`: every admissible row is `c · V_i` for a coefficient vector `c` of
/// length `r_i`. Immutable for the lifetime of a sampling run.
#[derive(Debug, Clone, PartialEq)]
pub struct RestrictionSet {
    bases: Vec<Matrix>,
}

impl RestrictionSet {
    /// Build a restriction set from explicit bases.
    ///
    /// # Errors
    ///
    /// [`GennormError::InvalidShape`] if the set is empty, if a basis does
    /// not have `N` columns (with `N` the number of bases), or if a basis has
    /// zero rows or more than `N` rows.
    pub fn new(bases: Vec<Matrix>) -> Result<Self> {
        let n = bases.len();
        if n == 0 {
            return Err(GennormError::InvalidShape {
                what: "restriction set",
                expected: (1, 1),
                actual: (0, 0),
            });
        }
        for basis in &bases {
            let (rows, cols) = basis.shape();
            if cols != n || rows == 0 || rows > n {
                return Err(GennormError::InvalidShape {
                    what: "restriction basis",
                    expected: (rows.clamp(1, n), n),
                    actual: (rows, cols),
                });
            }
        }
        Ok(Self { bases })
    }

    /// Every row free: each basis is the `N × N` identity.
    pub fn unrestricted(n: usize) -> Self {
        Self {
            bases: (0..n).map(|_| Matrix::identity(n, n)).collect(),
        }
    }

    /// Number of rows N covered by the set.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// True if the set covers no rows.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    /// Basis of row `i`.
    pub fn basis(&self, i: usize) -> &Matrix {
        &self.bases[i]
    }

    /// Restriction dimension `r_i` of row `i`.
    pub fn rank(&self, i: usize) -> usize {
        self.bases[i].nrows()
    }

    /// Iterate over the bases in row order.
    pub fn iter(&self) -> core::slice::Iter<'_, Matrix> {
        self.bases.iter()
    }

    /// Distance of `row` from the span of basis `i`.
    ///
    /// Solves the least-squares problem `min_c ‖c V_i − row‖` and returns the
    /// residual norm; zero (to rounding) iff `row` satisfies the restriction.
    pub fn residual(&self, i: usize, row: &RowVector) -> f64 {
        let basis = &self.bases[i];
        let gram = basis * basis.transpose();
        let rhs = basis * row.transpose();
        match gram.cholesky() {
            Some(chol) => {
                let coefficients = chol.solve(&rhs);
                (coefficients.transpose() * basis - row).norm()
            }
            None => f64::INFINITY,
        }
    }
}

/// One precision (inverse covariance) matrix per row, each `N × N`.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionStack {
    slices: Vec<Matrix>,
}

impl PrecisionStack {
    /// Build a precision stack from explicit matrices.
    ///
    /// # Errors
    ///
    /// [`GennormError::InvalidShape`] if the stack is empty or any slice is
    /// not `N × N` with `N` the number of slices.
    pub fn new(slices: Vec<Matrix>) -> Result<Self> {
        let n = slices.len();
        if n == 0 {
            return Err(GennormError::InvalidShape {
                what: "precision stack",
                expected: (1, 1),
                actual: (0, 0),
            });
        }
        for slice in &slices {
            if slice.shape() != (n, n) {
                return Err(GennormError::InvalidShape {
                    what: "precision matrix",
                    expected: (n, n),
                    actual: slice.shape(),
                });
            }
        }
        Ok(Self { slices })
    }

    /// Identity precision for every row.
    pub fn identity(n: usize) -> Self {
        Self {
            slices: (0..n).map(|_| Matrix::identity(n, n)).collect(),
        }
    }

    /// Number of rows N covered by the stack.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// True if the stack covers no rows.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Precision of row `i`.
    pub fn precision(&self, i: usize) -> &Matrix {
        &self.slices[i]
    }
}
