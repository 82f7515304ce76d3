//! Sign normalization properties.

use gennorm::{normalize_signs, GennormError, Matrix, SignTable};
use gennorm_core::normalization::SignNormalizer;
use proptest::prelude::*;

/// Strictly diagonally dominant, hence invertible, n × n matrix.
fn dominant(n: usize, entries: &[f64], flips: &[bool]) -> Matrix {
    Matrix::from_fn(n, n, |i, j| {
        let v = entries[i * n + j];
        if i == j {
            if flips[i] {
                -3.0
            } else {
                3.0
            }
        } else {
            v
        }
    })
}

fn case() -> impl Strategy<Value = (usize, Vec<f64>, Vec<f64>, Vec<bool>)> {
    (1usize..=4).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec(-0.9f64..0.9, n * n),
            prop::collection::vec(-0.9f64..0.9, n * n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The selected pattern attains the minimum distance over the whole table.
    #[test]
    fn prop_selected_pattern_is_minimal((n, r, d, flips) in case()) {
        let reference = dominant(n, &r, &vec![false; n]);
        let draw = dominant(n, &d, &flips);
        let normalizer = SignNormalizer::new(&reference).unwrap();

        let selected = normalizer.select(0, &draw).unwrap();
        let best = normalizer.distance(&draw, &selected).unwrap();
        for k in 0..normalizer.table().len() {
            let other = normalizer.distance(&draw, &normalizer.table().pattern(k)).unwrap();
            prop_assert!(best <= other + 1e-9, "pattern {} beats selection", k);
        }
    }

    /// A second pass changes nothing.
    #[test]
    fn prop_normalization_idempotent((n, r, d, flips) in case()) {
        let reference = dominant(n, &r, &vec![false; n]);
        let mut draws = vec![dominant(n, &d, &flips), -dominant(n, &r, &flips)];

        normalize_signs(&mut draws, &reference).unwrap();
        let once = draws.clone();
        let patterns = normalize_signs(&mut draws, &reference).unwrap();

        prop_assert!(patterns.iter().all(|p| p.is_identity()));
        prop_assert_eq!(draws, once);
    }
}

#[test]
fn table_order_for_three_rows() {
    let table = SignTable::new(3).unwrap();
    let signs: Vec<Vec<f64>> = (0..table.len())
        .map(|k| table.pattern(k).signs().to_vec())
        .collect();
    assert_eq!(signs[0], vec![-1.0, -1.0, -1.0]);
    assert_eq!(signs[1], vec![-1.0, -1.0, 1.0]);
    assert_eq!(signs[4], vec![1.0, -1.0, -1.0]);
    assert_eq!(signs[7], vec![1.0, 1.0, 1.0]);
}

#[test]
fn oversized_dimension_rejected() {
    let n = 17;
    let mut draws = vec![Matrix::identity(n, n)];
    assert_eq!(
        normalize_signs(&mut draws, &Matrix::identity(n, n)).unwrap_err(),
        GennormError::DimensionTooLarge { dimension: 17, max: 16 }
    );
}

#[test]
fn reference_dimension_mismatch_rejected() {
    let mut draws = vec![Matrix::identity(3, 3)];
    assert!(matches!(
        normalize_signs(&mut draws, &Matrix::identity(2, 2)),
        Err(GennormError::InvalidShape { what: "draw", .. })
    ));
}
