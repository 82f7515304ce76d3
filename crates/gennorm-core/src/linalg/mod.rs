//! Linear-algebra primitives used by the sampler.
//!
//! Only the pieces the sampler needs are provided: the orthogonal complement
//! of a column space (via Householder QR) and the Cholesky-based whitening
//! factors of the restricted precisions.

mod complement;
mod whitening;

pub use complement::orthogonal_complement;
pub use whitening::{symmetrize, whitening_factor};
