//! Haar-distributed orthogonal matrices.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::types::Matrix;

/// Draw an `n × n` orthogonal matrix uniformly from the Haar measure.
///
/// Takes the QR decomposition of a matrix of independent standard normals
/// and negates every column of `Q` whose matching diagonal entry of `R` is
/// negative. Without that correction the law of `Q` depends on the sign
/// convention of the decomposition.
pub fn random_orthogonal<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Matrix {
    let gaussian = Matrix::from_fn(n, n, |_, _| StandardNormal.sample(&mut *rng));
    let qr = gaussian.qr();
    let r = qr.r();
    let mut q = qr.q();

    for j in 0..n {
        if r[(j, j)] < 0.0 {
            let mut column = q.column_mut(j);
            column *= -1.0;
        }
    }
    q
}
