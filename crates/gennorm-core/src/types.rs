//! Type aliases and common types.

use nalgebra::{DMatrix, DVector, RowDVector};

/// Dense real matrix: structural matrices, restriction bases, precisions.
pub type Matrix = DMatrix<f64>;

/// Dense real column vector.
pub type Vector = DVector<f64>;

/// Dense real row vector, used for single rows of a structural matrix.
pub type RowVector = RowDVector<f64>;
