//! Numerical constants used throughout the crate.

/// Default deterministic seed for RNG operations.
///
/// Same seed + same inputs = same draws. The value `0x67656E6E6F726D`
/// is "gennorm" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x67656E6E6F726D;

/// Largest dimension accepted by the exhaustive sign search.
///
/// The sign table holds 2^N rows, so N = 16 already means 65,536 candidate
/// patterns per draw.
pub const MAX_SIGN_DIMENSION: usize = 16;

/// Largest whole χ² degrees of freedom drawn as a sum of squared normals.
///
/// Above this the leading coefficient is drawn from the χ² law directly,
/// which keeps a row update O(1) in the degrees of freedom.
pub const MAX_NORMAL_SUM_TERMS: usize = 1024;

/// Probability of flipping the sign of the leading restricted coefficient.
pub const SIGN_FLIP_PROBABILITY: f64 = 0.5;

/// Default relative floor for normal-gamma local variances.
pub const NORMAL_GAMMA_TOLERANCE: f64 = 1e-6;

/// Below this value a GIG `chi` or `psi` is treated as zero and the
/// Gamma / inverse-Gamma limit is used instead.
pub const GIG_ZERO_TOLERANCE: f64 = 10.0 * f64::EPSILON;
