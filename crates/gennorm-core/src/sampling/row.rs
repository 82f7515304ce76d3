//! Conditional update of a single row.

use rand::Rng;
use rand_distr::{ChiSquared, Distribution, StandardNormal};

use crate::constants::{MAX_NORMAL_SUM_TERMS, SIGN_FLIP_PROBABILITY};
use crate::error::{GennormError, Result};
use crate::linalg::orthogonal_complement;
use crate::math;
use crate::types::{Matrix, RowVector, Vector};

/// Law of the squared magnitude of the leading restricted coefficient.
///
/// `|α₀|² · post_nu` is χ² with `post_nu + 1` degrees of freedom. For whole
/// degrees of freedom up to [`MAX_NORMAL_SUM_TERMS`] it is drawn as a sum of
/// squared standard normals, otherwise from the χ² distribution directly.
#[derive(Debug, Clone)]
pub(crate) enum LeadingLaw {
    NormalSum { terms: usize },
    ChiSquared(ChiSquared<f64>),
}

impl LeadingLaw {
    pub(crate) fn new(post_nu: f64) -> Result<Self> {
        let df = post_nu + 1.0;
        if !(post_nu > 0.0) || !df.is_finite() {
            return Err(GennormError::InvalidParameter {
                name: "post_nu",
                value: post_nu,
            });
        }
        if math::floor(df) == df && df <= MAX_NORMAL_SUM_TERMS as f64 {
            Ok(Self::NormalSum { terms: df as usize })
        } else {
            ChiSquared::new(df)
                .map(Self::ChiSquared)
                .map_err(|_| GennormError::InvalidParameter { name: "post_nu", value: post_nu })
        }
    }

    /// Draw `Σ zⱼ²` (or its χ² equivalent).
    fn sample_sum_of_squares<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::NormalSum { terms } => (0..*terms)
                .map(|_| {
                    let z: f64 = StandardNormal.sample(&mut *rng);
                    z * z
                })
                .sum(),
            Self::ChiSquared(chi) => chi.sample(rng),
        }
    }
}

/// Unit direction orthogonal to every row except `row`.
///
/// Removes `row` from `state`, leaving `(N−1) × N`, and takes the one-column
/// orthogonal complement of its transpose.
pub(crate) fn complement_direction(state: &Matrix, row: usize) -> RowVector {
    let others = state.clone().remove_row(row);
    let w = orthogonal_complement(&others.transpose());
    w.column(0).transpose()
}

/// Orthonormal basis of the restricted space with `w1` as its first row.
///
/// For `r = 1` this is `w1` itself and no completion happens.
pub(crate) fn restricted_basis(w1: &RowVector) -> Matrix {
    let r = w1.len();
    if r == 1 {
        return Matrix::from_row_slice(1, 1, &[w1[0]]);
    }

    let completion = orthogonal_complement(&Matrix::from_column_slice(r, 1, w1.as_slice()));
    let mut basis = Matrix::zeros(r, r);
    basis.row_mut(0).copy_from(w1);
    basis.rows_mut(1, r - 1).copy_from(&completion.transpose());
    basis
}

/// Draw the restricted coefficient vector α of length `rank`.
pub(crate) fn draw_alpha<R: Rng + ?Sized>(
    rank: usize,
    post_nu: f64,
    leading: &LeadingLaw,
    rng: &mut R,
) -> Vector {
    let mut alpha = Vector::zeros(rank);

    let mut magnitude = math::sqrt(leading.sample_sum_of_squares(rng) / post_nu);
    if rng.random::<f64>() < SIGN_FLIP_PROBABILITY {
        magnitude = -magnitude;
    }
    alpha[0] = magnitude;

    let scale = 1.0 / math::sqrt(post_nu);
    for k in 1..rank {
        let z: f64 = StandardNormal.sample(rng);
        alpha[k] = z * scale;
    }
    alpha
}

/// Redraw row `row` of `state` in place.
///
/// `basis` is `Vᵢ` (`r × N`) and `factor` the cached whitening factor `Uᵢ`
/// (`r × r`). Only row `row` of `state` is written; the new row is exactly
/// `b · Vᵢ` for some coefficient vector `b`.
pub(crate) fn resample_row<R: Rng + ?Sized>(
    state: &mut Matrix,
    row: usize,
    basis: &Matrix,
    factor: &Matrix,
    post_nu: f64,
    leading: &LeadingLaw,
    rng: &mut R,
) {
    let w = complement_direction(state, row);

    let w1_raw = &w * basis.transpose() * factor.transpose();
    let w1 = &w1_raw / w1_raw.norm();
    let wn = restricted_basis(&w1);

    let alpha = draw_alpha(basis.nrows(), post_nu, leading, rng);
    let coefficients = alpha.transpose() * wn * factor;
    state.set_row(row, &(coefficients * basis));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_leading_law_selection() {
        assert!(matches!(
            LeadingLaw::new(8.0).unwrap(),
            LeadingLaw::NormalSum { terms: 9 }
        ));
        assert!(matches!(
            LeadingLaw::new(2.5).unwrap(),
            LeadingLaw::ChiSquared(_)
        ));
        assert!(LeadingLaw::new(0.0).is_err());
        assert!(LeadingLaw::new(f64::NAN).is_err());
    }

    #[test]
    fn test_large_whole_degrees_of_freedom_use_chi_squared() {
        let at_limit = (MAX_NORMAL_SUM_TERMS - 1) as f64;
        assert!(matches!(
            LeadingLaw::new(at_limit).unwrap(),
            LeadingLaw::NormalSum { terms } if terms == MAX_NORMAL_SUM_TERMS
        ));
        assert!(matches!(
            LeadingLaw::new(at_limit + 1.0).unwrap(),
            LeadingLaw::ChiSquared(_)
        ));

        // A huge whole value must not loop once per degree of freedom.
        let law = LeadingLaw::new(1e12).unwrap();
        assert!(matches!(law, LeadingLaw::ChiSquared(_)));
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let ratio = law.sample_sum_of_squares(&mut rng) / 1e12;
        assert!((ratio - 1.0).abs() < 1e-4, "ratio {}", ratio);
    }

    #[test]
    fn test_complement_direction_is_orthogonal_to_other_rows() {
        let state = Matrix::from_row_slice(3, 3, &[1.0, 2.0, 0.5, -0.3, 1.0, 0.2, 0.7, 0.1, 1.5]);
        let w = complement_direction(&state, 1);
        assert!((w.norm() - 1.0).abs() < 1e-12);
        assert!(state.row(0).dot(&w).abs() < 1e-12);
        assert!(state.row(2).dot(&w).abs() < 1e-12);
    }

    #[test]
    fn test_rank_one_basis_is_w1() {
        let w1 = RowVector::from_row_slice(&[-1.0]);
        let wn = restricted_basis(&w1);
        assert_eq!(wn, Matrix::from_row_slice(1, 1, &[-1.0]));
    }

    #[test]
    fn test_basis_is_orthonormal_with_w1_first() {
        let raw = RowVector::from_row_slice(&[0.3, -1.2, 0.5, 2.0]);
        let w1 = &raw / raw.norm();
        let wn = restricted_basis(&w1);

        assert_eq!(wn.shape(), (4, 4));
        assert!((wn.row(0) - &w1).amax() < 1e-15);
        let gram = &wn * wn.transpose();
        assert!((gram - Matrix::identity(4, 4)).amax() < 1e-12);
    }

    #[test]
    fn test_alpha_length_matches_rank() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let leading = LeadingLaw::new(8.0).unwrap();
        assert_eq!(draw_alpha(1, 8.0, &leading, &mut rng).len(), 1);
        assert_eq!(draw_alpha(3, 8.0, &leading, &mut rng).len(), 3);
    }

    #[test]
    fn test_leading_coefficient_has_both_signs() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(17);
        let leading = LeadingLaw::new(4.0).unwrap();
        let negatives = (0..400)
            .filter(|_| draw_alpha(2, 4.0, &leading, &mut rng)[0] < 0.0)
            .count();
        assert!(negatives > 120 && negatives < 280, "got {} negatives", negatives);
    }

    #[test]
    fn test_resample_row_respects_restriction() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let mut state = Matrix::identity(3, 3);
        let basis = Matrix::from_row_slice(2, 3, &[1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let factor = Matrix::identity(2, 2) * 2.0;
        let leading = LeadingLaw::new(4.0).unwrap();

        resample_row(&mut state, 0, &basis, &factor, 4.0, &leading, &mut rng);

        // Row 0 must be c·V: equal first two entries
        assert!((state[(0, 0)] - state[(0, 1)]).abs() < 1e-12);
        // Other rows untouched
        assert_eq!(state.row(1).into_owned(), RowVector::from_row_slice(&[0.0, 1.0, 0.0]));
        assert_eq!(state.row(2).into_owned(), RowVector::from_row_slice(&[0.0, 0.0, 1.0]));
    }
}
