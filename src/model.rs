//! Inputs of the structural-matrix sampler.

use gennorm_core::{validate_inputs, GennormError, Matrix, PrecisionStack, RestrictionSet};

/// Everything the row-wise sweep conditions on.
///
/// Shapes and degrees of freedom are checked once at construction, so a
/// `StructuralModel` can be run any number of times.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuralModel {
    initial: Matrix,
    precision: PrecisionStack,
    degrees_of_freedom: f64,
    restrictions: RestrictionSet,
}

impl StructuralModel {
    /// Assemble a model.
    ///
    /// # Errors
    ///
    /// Any error of [`validate_inputs`]: the inputs disagree on N, or
    /// `degrees_of_freedom` is not finite and greater than N.
    pub fn new(
        initial: Matrix,
        precision: PrecisionStack,
        degrees_of_freedom: f64,
        restrictions: RestrictionSet,
    ) -> Result<Self, GennormError> {
        validate_inputs(&initial, &precision, degrees_of_freedom, &restrictions)?;
        Ok(Self {
            initial,
            precision,
            degrees_of_freedom,
            restrictions,
        })
    }

    /// Unrestricted N × N model with identity precisions, started at the identity.
    pub fn unrestricted(n: usize, degrees_of_freedom: f64) -> Result<Self, GennormError> {
        Self::new(
            Matrix::identity(n, n),
            PrecisionStack::identity(n),
            degrees_of_freedom,
            RestrictionSet::unrestricted(n),
        )
    }

    /// Dimension N.
    pub fn dimension(&self) -> usize {
        self.restrictions.len()
    }

    /// Starting matrix of the chain.
    pub fn initial(&self) -> &Matrix {
        &self.initial
    }

    /// Per-row precision matrices.
    pub fn precision(&self) -> &PrecisionStack {
        &self.precision
    }

    /// Prior degrees of freedom ν.
    pub fn degrees_of_freedom(&self) -> f64 {
        self.degrees_of_freedom
    }

    /// Per-row restriction bases.
    pub fn restrictions(&self) -> &RestrictionSet {
        &self.restrictions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrestricted_model() {
        let model = StructuralModel::unrestricted(3, 8.0).unwrap();
        assert_eq!(model.dimension(), 3);
        assert_eq!(model.degrees_of_freedom(), 8.0);
        assert_eq!(model.restrictions().rank(2), 3);
    }

    #[test]
    fn test_rejects_mismatched_inputs() {
        let err = StructuralModel::new(
            Matrix::identity(3, 3),
            PrecisionStack::identity(2),
            8.0,
            RestrictionSet::unrestricted(2),
        )
        .unwrap_err();
        assert!(matches!(err, GennormError::InvalidShape { what: "initial matrix", .. }));

        let err = StructuralModel::new(
            Matrix::identity(2, 2),
            PrecisionStack::identity(3),
            8.0,
            RestrictionSet::unrestricted(2),
        )
        .unwrap_err();
        assert!(matches!(err, GennormError::InvalidShape { what: "precision stack", .. }));
    }

    #[test]
    fn test_rejects_small_degrees_of_freedom() {
        assert!(matches!(
            StructuralModel::unrestricted(4, 4.0),
            Err(GennormError::InvalidDegreesOfFreedom { dimension: 4, .. })
        ));
    }
}
