//! Core numerics for restricted generalized-normal sampling of structural matrices.
//!
//! This crate draws the square structural matrix `B` of a Bayesian structural
//! VAR row by row from its conditional generalized-normal law, subject to
//! linear restrictions on every row, and resolves the row-sign
//! indeterminacy of the resulting draws. It is designed to work in `no_std`
//! environments with only an allocator.
//!
//! # Features
//!
//! - `std` (default): Enable standard library support (`std::error::Error`, faster float math)
//! - `parallel`: Run the per-draw sign search on rayon (requires `std`)
//!
//! # Usage
//!
//! This crate is typically used through the `gennorm` crate, which adds
//! configuration, logging and result summaries. It can be used directly
//! when the caller owns the random stream:
//!
//! ```ignore
//! use gennorm_core::{generate_draws, PrecisionStack, RestrictionSet, Matrix};
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let restrictions = RestrictionSet::unrestricted(2);
//! let precision = PrecisionStack::identity(2);
//! let draws = generate_draws(100, &Matrix::identity(2, 2), &precision, 10.0,
//!                            &restrictions, true, &mut rng)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod auxiliary;
pub mod constants;
pub mod error;
pub mod linalg;
pub mod math;
pub mod normalization;
pub mod restrictions;
pub mod rng;
pub mod sampling;
pub mod types;

// Re-export commonly used items at crate root
pub use auxiliary::{
    gig, random_orthogonal, scale_draw, HorseshoeState, NormalGammaPrior, NormalGammaState,
};
pub use error::{GennormError, Result};
pub use linalg::orthogonal_complement;
pub use normalization::{
    normalize_signs, reference_from_draw, SignNormalizer, SignPattern, SignTable,
};
pub use restrictions::{PrecisionStack, RestrictionSet};
pub use rng::counter_rng_seed;
pub use sampling::{generate_draws, validate_inputs, DrawDriver, DrawSequence};
pub use types::{Matrix, RowVector, Vector};
