//! # gennorm
//!
//! Restricted generalized-normal sampling of structural matrices.
//!
//! In a Bayesian structural VAR the contemporaneous matrix `B` has, row by
//! row, a conditional generalized-normal posterior. This crate runs the
//! row-wise Gibbs sweep over `B` under per-row linear restrictions and
//! resolves the sign indeterminacy of the draws, returning:
//! - The sequence of draws after burn-in
//! - The sign pattern applied to each draw
//! - The reference matrix the draws were normalized against
//! - A serializable summary (elementwise means, spreads, sign statistics)
//!
//! ## Quick Start
//!
//! ```ignore
//! use gennorm::{Config, Sampler, StructuralModel};
//!
//! let model = StructuralModel::unrestricted(3, 12.0)?;
//! let posterior = Sampler::with_config(Config::quick().seed(7)).run(&model)?;
//!
//! println!("{}", gennorm::output::to_json_pretty(&posterior.summary())?);
//! ```
//!
//! ## Lower-level API
//!
//! [`generate_draws`], [`normalize_signs`] and [`orthogonal_complement`] are
//! re-exported from `gennorm-core` for callers that manage their own random
//! stream.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod model;
mod result;
mod sampler;

pub mod output;

pub use config::{Config, ReferenceMatrix};
pub use error::SamplerError;
pub use model::StructuralModel;
pub use result::{DrawSummary, NormalizationPolicy, Posterior};
pub use sampler::Sampler;

// Re-exports from the core crate
pub use gennorm_core::{
    generate_draws, normalize_signs, orthogonal_complement, reference_from_draw, DrawDriver,
    DrawSequence, GennormError, Matrix, PrecisionStack, RestrictionSet, RowVector, SignPattern,
    SignTable,
};
