//! Sampler output types.

use serde::{Deserialize, Serialize};

use gennorm_core::{DrawSequence, Matrix, SignPattern};

// ============================================================================
// Posterior - Draws returned by a sampler run
// ============================================================================

/// Draws of one sampler run, with the sign information needed to interpret them.
#[derive(Debug, Clone)]
pub struct Posterior {
    /// Kept draws, in sweep order.
    pub draws: DrawSequence,

    /// Pattern applied to each draw. Empty when `normalized` is false.
    pub sign_patterns: Vec<SignPattern>,

    /// Matrix the draws were (or would have been) normalized against.
    pub reference: Matrix,

    /// Seed of the random stream that produced the draws.
    pub seed: u64,

    /// Whether sign normalization was applied.
    pub normalized: bool,
}

impl Posterior {
    /// Number of kept draws.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// True if the run kept no draws.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Elementwise posterior mean. `None` for an empty run.
    pub fn mean(&self) -> Option<Matrix> {
        let first = self.draws.get(0)?;
        let mut total = Matrix::zeros(first.nrows(), first.ncols());
        for draw in self.draws.iter() {
            total += draw;
        }
        Some(total / self.draws.len() as f64)
    }

    /// Serializable summary of the run.
    pub fn summary(&self) -> DrawSummary {
        let n = self.draws.get(0).map_or(self.reference.nrows(), |d| d.nrows());
        let count = self.draws.len();
        let mean = self.mean().unwrap_or_else(|| Matrix::zeros(n, n));

        let mut spread = Matrix::zeros(n, n);
        if count > 1 {
            for draw in self.draws.iter() {
                let diff = draw - &mean;
                spread += diff.component_mul(&diff);
            }
            spread /= (count - 1) as f64;
        }
        let std_dev = spread.map(f64::sqrt);

        let positive_diagonal_share = (0..n)
            .map(|i| {
                if count == 0 {
                    return 0.0;
                }
                let positive = self.draws.iter().filter(|d| d[(i, i)] > 0.0).count();
                positive as f64 / count as f64
            })
            .collect();

        let flipped_rows = (0..n)
            .map(|i| {
                self.sign_patterns
                    .iter()
                    .filter(|p| p.signs()[i] < 0.0)
                    .count()
            })
            .collect();

        DrawSummary {
            dimension: n,
            draws: count,
            seed: self.seed,
            normalized: self.normalized,
            mean: rows_of(&mean),
            std_dev: rows_of(&std_dev),
            positive_diagonal_share,
            flipped_rows,
            identity_patterns: self
                .sign_patterns
                .iter()
                .filter(|p| p.is_identity())
                .count(),
        }
    }
}

fn rows_of(m: &Matrix) -> Vec<Vec<f64>> {
    m.row_iter().map(|row| row.iter().copied().collect()).collect()
}

// ============================================================================
// DrawSummary - Serializable digest of a Posterior
// ============================================================================

/// Compact, serializable digest of a [`Posterior`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSummary {
    /// Dimension N.
    pub dimension: usize,

    /// Number of kept draws.
    pub draws: usize,

    /// Seed of the run.
    pub seed: u64,

    /// Whether the draws were sign-normalized.
    pub normalized: bool,

    /// Elementwise mean, row-major.
    pub mean: Vec<Vec<f64>>,

    /// Elementwise sample standard deviation, row-major.
    pub std_dev: Vec<Vec<f64>>,

    /// Per row, share of draws with a positive diagonal entry.
    pub positive_diagonal_share: Vec<f64>,

    /// Per row, number of draws whose sign pattern flipped that row.
    pub flipped_rows: Vec<usize>,

    /// Number of draws left unchanged by normalization.
    pub identity_patterns: usize,
}

// ============================================================================
// NormalizationPolicy - How to handle normalization failures
// ============================================================================

/// Policy for a sign normalization that cannot be carried out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalizationPolicy {
    /// Return the error. No draws are handed back.
    #[default]
    FailClosed,

    /// Log a warning and return the unnormalized draws.
    /// Use when: a singular draw or reference should not discard the whole chain.
    FailOpen,
}

impl NormalizationPolicy {
    /// Get policy from environment variable, or use default.
    ///
    /// Checks `GENNORM_NORMALIZATION_POLICY`:
    /// - "fail_open" or "skip" → FailOpen
    /// - "fail_closed" or "strict" → FailClosed
    /// - unset or other → default
    pub fn from_env_or(default: Self) -> Self {
        Self::parse(
            std::env::var("GENNORM_NORMALIZATION_POLICY")
                .ok()
                .as_deref(),
            default,
        )
    }

    fn parse(value: Option<&str>, default: Self) -> Self {
        match value {
            Some("fail_open") | Some("skip") => Self::FailOpen,
            Some("fail_closed") | Some("strict") => Self::FailClosed,
            _ => default,
        }
    }
}
