//! Draw driver: initialization phase plus repeated full sweeps.

use alloc::vec::Vec;
use core::ops::Index;

use rand::Rng;

use super::row::{resample_row, LeadingLaw};
use crate::error::{GennormError, Result};
use crate::linalg::whitening_factor;
use crate::normalization::{normalize_signs, reference_from_draw, SignPattern};
use crate::restrictions::{PrecisionStack, RestrictionSet};
use crate::types::Matrix;

/// Ordered snapshots of the structural matrix, one per sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawSequence {
    draws: Vec<Matrix>,
}

impl DrawSequence {
    /// Empty sequence with room for `capacity` draws.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            draws: Vec::with_capacity(capacity),
        }
    }

    /// Append a snapshot.
    pub fn push(&mut self, draw: Matrix) {
        self.draws.push(draw);
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// True if no draws were produced.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Most recent draw.
    pub fn last(&self) -> Option<&Matrix> {
        self.draws.last()
    }

    /// Draw at position `index`.
    pub fn get(&self, index: usize) -> Option<&Matrix> {
        self.draws.get(index)
    }

    /// Iterate over the draws in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Matrix> {
        self.draws.iter()
    }

    /// Draws as a slice.
    pub fn as_slice(&self) -> &[Matrix] {
        &self.draws
    }

    /// Draws as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [Matrix] {
        &mut self.draws
    }

    /// Consume the sequence, returning the draws.
    pub fn into_vec(self) -> Vec<Matrix> {
        self.draws
    }

    /// Sign-normalize every draw in place against `reference`.
    ///
    /// See [`normalize_signs`].
    pub fn normalize(&mut self, reference: &Matrix) -> Result<Vec<SignPattern>> {
        normalize_signs(&mut self.draws, reference)
    }
}

impl From<Vec<Matrix>> for DrawSequence {
    fn from(draws: Vec<Matrix>) -> Self {
        Self { draws }
    }
}

impl Index<usize> for DrawSequence {
    type Output = Matrix;

    fn index(&self, index: usize) -> &Matrix {
        &self.draws[index]
    }
}

impl<'a> IntoIterator for &'a DrawSequence {
    type Item = &'a Matrix;
    type IntoIter = core::slice::Iter<'a, Matrix>;

    fn into_iter(self) -> Self::IntoIter {
        self.draws.iter()
    }
}

/// Sampler state for one run: cached whitening factors and the working matrix.
///
/// Construction is the initialization phase: inputs are validated and every
/// row's whitening factor is computed once. Sweeps afterwards only read the
/// cache. The working matrix is a copy of the caller's initial matrix, which
/// is never mutated.
#[derive(Debug, Clone)]
pub struct DrawDriver<'a> {
    restrictions: &'a RestrictionSet,
    factors: Vec<Matrix>,
    post_nu: f64,
    leading: LeadingLaw,
    state: Matrix,
    sweeps: usize,
}

impl<'a> DrawDriver<'a> {
    /// Validate the inputs and compute the whitening factor of every row.
    ///
    /// # Errors
    ///
    /// - [`GennormError::InvalidShape`] if `initial`, `precision` and
    ///   `restrictions` disagree on N.
    /// - [`GennormError::InvalidDegreesOfFreedom`] unless
    ///   `degrees_of_freedom` is finite and greater than N.
    /// - [`GennormError::NonPositiveDefinite`] if a row's restricted
    ///   precision cannot be factored.
    pub fn new(
        initial: &Matrix,
        precision: &PrecisionStack,
        degrees_of_freedom: f64,
        restrictions: &'a RestrictionSet,
    ) -> Result<Self> {
        validate_inputs(initial, precision, degrees_of_freedom, restrictions)?;

        let n = restrictions.len();
        let post_nu = degrees_of_freedom - n as f64;
        let leading = LeadingLaw::new(post_nu)?;

        let factors = restrictions
            .iter()
            .enumerate()
            .map(|(i, basis)| whitening_factor(basis, precision.precision(i), post_nu, i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            restrictions,
            factors,
            post_nu,
            leading,
            state: initial.clone(),
            sweeps: 0,
        })
    }

    /// Dimension N of the structural matrix.
    pub fn dimension(&self) -> usize {
        self.state.nrows()
    }

    /// Posterior degrees of freedom `ν − N`.
    pub fn post_nu(&self) -> f64 {
        self.post_nu
    }

    /// Cached whitening factor of row `i`.
    pub fn whitening_factor(&self, i: usize) -> &Matrix {
        &self.factors[i]
    }

    /// Current working matrix.
    pub fn state(&self) -> &Matrix {
        &self.state
    }

    /// Number of completed sweeps.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Redraw every row once, in row order `0..N`.
    ///
    /// Each row conditions on the already-updated rows of the current sweep
    /// and the previous-sweep values of the rest.
    pub fn sweep<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for i in 0..self.state.nrows() {
            resample_row(
                &mut self.state,
                i,
                self.restrictions.basis(i),
                &self.factors[i],
                self.post_nu,
                &self.leading,
                rng,
            );
        }
        self.sweeps += 1;
    }

    /// Run `n` sweeps, snapshotting the matrix after each one.
    pub fn run<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> DrawSequence {
        let mut draws = DrawSequence::with_capacity(n);
        for _ in 0..n {
            self.sweep(rng);
            draws.push(self.state.clone());
        }
        draws
    }

    /// Consume the driver, returning the working matrix.
    pub fn into_state(self) -> Matrix {
        self.state
    }
}

/// Check that the sampler inputs agree on N and that `degrees_of_freedom > N`.
///
/// N is taken from `restrictions`. This is the entry check of
/// [`DrawDriver::new`]; it draws nothing and computes no factors.
///
/// # Errors
///
/// [`GennormError::InvalidShape`] if `initial` is not N × N or `precision`
/// does not hold N slices, and [`GennormError::InvalidDegreesOfFreedom`]
/// unless `degrees_of_freedom` is finite and greater than N.
pub fn validate_inputs(
    initial: &Matrix,
    precision: &PrecisionStack,
    degrees_of_freedom: f64,
    restrictions: &RestrictionSet,
) -> Result<()> {
    let n = restrictions.len();
    if initial.shape() != (n, n) {
        return Err(GennormError::InvalidShape {
            what: "initial matrix",
            expected: (n, n),
            actual: initial.shape(),
        });
    }
    if precision.len() != n {
        return Err(GennormError::InvalidShape {
            what: "precision stack",
            expected: (n, n),
            actual: (precision.len(), precision.len()),
        });
    }
    if !degrees_of_freedom.is_finite() || degrees_of_freedom <= n as f64 {
        return Err(GennormError::InvalidDegreesOfFreedom {
            degrees_of_freedom,
            dimension: n,
        });
    }
    Ok(())
}

/// Draw `n` structural matrices from the restricted generalized-normal law.
///
/// `initial` seeds the chain and is copied, never mutated. When `normalise`
/// is set and at least one draw was produced, the draws are sign-normalized
/// against [`reference_from_draw`] of the final state.
///
/// # Errors
///
/// Any error of [`DrawDriver::new`], plus the normalization errors of
/// [`normalize_signs`] when `normalise` is set. No draws are returned after
/// an error.
pub fn generate_draws<R: Rng + ?Sized>(
    n: usize,
    initial: &Matrix,
    precision: &PrecisionStack,
    degrees_of_freedom: f64,
    restrictions: &RestrictionSet,
    normalise: bool,
    rng: &mut R,
) -> Result<DrawSequence> {
    let mut driver = DrawDriver::new(initial, precision, degrees_of_freedom, restrictions)?;
    let mut draws = driver.run(n, rng);

    if normalise && !draws.is_empty() {
        let reference = reference_from_draw(driver.state());
        draws.normalize(&reference)?;
    }
    Ok(draws)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn diagonal_restrictions(n: usize) -> RestrictionSet {
        let bases = (0..n)
            .map(|i| {
                let mut basis = Matrix::zeros(1, n);
                basis[(0, i)] = 1.0;
                basis
            })
            .collect();
        RestrictionSet::new(bases).unwrap()
    }

    #[test]
    fn test_initial_matrix_not_mutated() {
        let restrictions = RestrictionSet::unrestricted(2);
        let precision = PrecisionStack::identity(2);
        let initial = Matrix::identity(2, 2);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);

        let draws =
            generate_draws(5, &initial, &precision, 10.0, &restrictions, false, &mut rng).unwrap();

        assert_eq!(draws.len(), 5);
        assert_eq!(initial, Matrix::identity(2, 2));
    }

    #[test]
    fn test_whitening_factors_cached_at_construction() {
        let restrictions = RestrictionSet::unrestricted(3);
        let precision = PrecisionStack::identity(3);
        let driver =
            DrawDriver::new(&Matrix::identity(3, 3), &precision, 7.0, &restrictions).unwrap();

        assert_eq!(driver.post_nu(), 4.0);
        assert_eq!(driver.sweeps(), 0);
        for i in 0..3 {
            assert!((driver.whitening_factor(i) - Matrix::identity(3, 3) * 2.0).amax() < 1e-12);
        }
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let restrictions = RestrictionSet::unrestricted(2);
        let precision = PrecisionStack::identity(3);
        let err = DrawDriver::new(&Matrix::identity(2, 2), &precision, 10.0, &restrictions)
            .unwrap_err();
        assert!(matches!(
            err,
            GennormError::InvalidShape {
                what: "precision stack",
                ..
            }
        ));

        let precision = PrecisionStack::identity(2);
        let err = DrawDriver::new(&Matrix::identity(3, 3), &precision, 10.0, &restrictions)
            .unwrap_err();
        assert!(matches!(
            err,
            GennormError::InvalidShape {
                what: "initial matrix",
                ..
            }
        ));
    }

    #[test]
    fn test_degrees_of_freedom_must_exceed_dimension() {
        let restrictions = RestrictionSet::unrestricted(3);
        let precision = PrecisionStack::identity(3);
        for dof in [3.0, 1.0, f64::INFINITY, f64::NAN] {
            let err =
                DrawDriver::new(&Matrix::identity(3, 3), &precision, dof, &restrictions).unwrap_err();
            assert!(matches!(err, GennormError::InvalidDegreesOfFreedom { dimension: 3, .. }));
        }
    }

    #[test]
    fn test_indefinite_precision_is_fatal() {
        let restrictions = RestrictionSet::unrestricted(2);
        let precision = PrecisionStack::new(vec![
            Matrix::identity(2, 2),
            Matrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]),
        ])
        .unwrap();
        let err = DrawDriver::new(&Matrix::identity(2, 2), &precision, 5.0, &restrictions)
            .unwrap_err();
        assert_eq!(err, GennormError::NonPositiveDefinite { row: 1 });
    }

    #[test]
    fn test_rank_one_rows_stay_on_their_axis() {
        let restrictions = diagonal_restrictions(3);
        let precision = PrecisionStack::identity(3);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let mut driver =
            DrawDriver::new(&Matrix::identity(3, 3), &precision, 6.0, &restrictions).unwrap();

        let draws = driver.run(20, &mut rng);
        for draw in &draws {
            for i in 0..3 {
                for j in 0..3 {
                    if i != j {
                        assert_eq!(draw[(i, j)], 0.0);
                    }
                }
                assert!(draw[(i, i)] != 0.0);
            }
        }
        assert_eq!(driver.sweeps(), 20);
    }

    #[test]
    fn test_single_row_system() {
        let restrictions = RestrictionSet::unrestricted(1);
        let precision = PrecisionStack::identity(1);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let draws = generate_draws(
            10,
            &Matrix::identity(1, 1),
            &precision,
            4.0,
            &restrictions,
            true,
            &mut rng,
        )
        .unwrap();
        assert!(draws.iter().all(|d| d[(0, 0)] > 0.0));
    }

    #[test]
    fn test_zero_draws() {
        let restrictions = RestrictionSet::unrestricted(2);
        let precision = PrecisionStack::identity(2);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        let draws = generate_draws(
            0,
            &Matrix::identity(2, 2),
            &precision,
            4.0,
            &restrictions,
            true,
            &mut rng,
        )
        .unwrap();
        assert!(draws.is_empty());
    }

    #[test]
    fn test_entry_check_agrees_with_driver() {
        let restrictions = RestrictionSet::unrestricted(2);
        let cases = [
            (Matrix::identity(3, 3), PrecisionStack::identity(2), 10.0),
            (Matrix::identity(2, 2), PrecisionStack::identity(3), 10.0),
            (Matrix::identity(2, 2), PrecisionStack::identity(2), 2.0),
        ];
        for (initial, precision, dof) in &cases {
            let direct = validate_inputs(initial, precision, *dof, &restrictions).unwrap_err();
            let via_driver = DrawDriver::new(initial, precision, *dof, &restrictions).unwrap_err();
            assert_eq!(direct, via_driver);
        }
        assert!(validate_inputs(
            &Matrix::identity(2, 2),
            &PrecisionStack::identity(2),
            2.5,
            &restrictions
        )
        .is_ok());
    }
}
