//! Error type of the sampler facade.

use gennorm_core::GennormError;
use thiserror::Error;

/// Error returned by [`Sampler::run`](crate::Sampler::run).
#[derive(Debug, Error)]
pub enum SamplerError {
    /// [`Config::validate`](crate::Config::validate) rejected the configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The model inputs were invalid, or sampling or normalization failed.
    #[error(transparent)]
    Model(#[from] GennormError),
}
