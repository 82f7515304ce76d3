//! Row-wise restricted Gibbs sampling of the structural matrix.
//!
//! One draw is a full sweep over the rows `0..N`; each row is redrawn from
//! its conditional generalized-normal law given the current values of all
//! other rows:
//!
//! ```text
//! w      ⟂ span{ b_j : j ≠ i }                  (orthogonal complement)
//! w1     = w Vᵢᵀ Uᵢᵀ / ‖w Vᵢᵀ Uᵢᵀ‖                (whitened direction)
//! Wn     = [w1; completion]                     (orthonormal, r_i × r_i)
//! α₀     = ±√(χ²(ν−N+1) / (ν−N)),  α_k ~ N(0, 1/(ν−N))
//! b_i    = (αᵀ Wn Uᵢ) Vᵢ
//! ```
//!
//! where `Vᵢ` is the restriction basis of row `i` and `Uᵢ` its cached
//! whitening factor.

mod driver;
mod row;

pub use driver::{generate_draws, validate_inputs, DrawDriver, DrawSequence};
