//! Error types for matrix sampling and sign normalization.

use core::fmt;

/// Error returned when sampling or normalization cannot proceed.
///
/// Every variant is fatal for the call that produced it: nothing is retried,
/// and no partially updated state is handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GennormError {
    /// Dimensions of the inputs do not agree.
    ///
    /// Detected before any sampling happens.
    InvalidShape {
        /// Which input was malformed.
        what: &'static str,
        /// Expected shape as (rows, cols).
        expected: (usize, usize),
        /// Shape actually supplied.
        actual: (usize, usize),
    },

    /// Degrees of freedom must be finite and exceed the matrix dimension.
    InvalidDegreesOfFreedom {
        /// Value supplied by the caller.
        degrees_of_freedom: f64,
        /// Dimension N of the structural matrix.
        dimension: usize,
    },

    /// The restricted, symmetrized precision of a row is not positive definite.
    ///
    /// This indicates an invalid pairing of precision matrix and restriction
    /// basis for that row (e.g. a rank-deficient basis).
    NonPositiveDefinite {
        /// Row whose whitening factor could not be computed.
        row: usize,
    },

    /// The reference matrix used for sign normalization is singular.
    SingularReference,

    /// A draw handed to the sign normalizer is singular.
    SingularDraw {
        /// Position of the draw in the sequence.
        index: usize,
    },

    /// The exhaustive sign search was asked for a dimension above the supported maximum.
    DimensionTooLarge {
        /// Requested dimension.
        dimension: usize,
        /// Largest supported dimension.
        max: usize,
    },

    /// A distribution parameter is outside its domain.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
}

impl fmt::Display for GennormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape {
                what,
                expected,
                actual,
            } => write!(
                f,
                "invalid shape for {}: expected {}x{}, got {}x{}",
                what, expected.0, expected.1, actual.0, actual.1
            ),
            Self::InvalidDegreesOfFreedom {
                degrees_of_freedom,
                dimension,
            } => write!(
                f,
                "degrees of freedom must be finite and exceed the dimension {}, got {}",
                dimension, degrees_of_freedom
            ),
            Self::NonPositiveDefinite { row } => write!(
                f,
                "restricted precision of row {} is not positive definite",
                row
            ),
            Self::SingularReference => write!(f, "reference matrix is singular"),
            Self::SingularDraw { index } => write!(f, "draw {} is singular", index),
            Self::DimensionTooLarge { dimension, max } => write!(
                f,
                "sign search supports dimensions up to {}, got {}",
                max, dimension
            ),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid value for parameter {}: {}", name, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GennormError {}

/// Result type for fallible core operations.
pub type Result<T> = core::result::Result<T, GennormError>;
