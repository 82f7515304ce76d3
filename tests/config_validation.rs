//! Tests for configuration validation.
//!
//! Builder methods panic on values that can never be valid; `validate`
//! reports everything else before a run starts.

use gennorm::{Config, Matrix, NormalizationPolicy, ReferenceMatrix, Sampler, SamplerError, StructuralModel};

// =============================================================================
// DRAW COUNT VALIDATION
// =============================================================================

#[test]
#[should_panic(expected = "draws must be positive")]
fn draws_zero_panics() {
    let _ = Config::new().draws(0);
}

#[test]
fn draws_one_valid() {
    let config = Config::new().draws(1);
    assert_eq!(config.draws, 1);
    assert!(config.validate().is_ok());
}

#[test]
fn draws_zero_rejected_by_validate() {
    let mut config = Config::new();
    config.draws = 0;
    assert_eq!(config.validate().unwrap_err(), "draws must be positive");
}

#[test]
fn burn_in_zero_valid() {
    let config = Config::new().burn_in(0);
    assert!(config.validate().is_ok());
}

// =============================================================================
// REFERENCE VALIDATION
// =============================================================================

#[test]
fn non_square_reference_rejected() {
    let config = Config::new().reference(Matrix::zeros(3, 2));
    assert!(config.validate().is_err());
}

#[test]
fn fixed_reference_recorded() {
    let config = Config::new().reference(Matrix::identity(2, 2));
    assert_eq!(config.reference, ReferenceMatrix::Fixed(Matrix::identity(2, 2)));
}

#[test]
fn invalid_config_stops_run() {
    let model = StructuralModel::unrestricted(2, 6.0).unwrap();
    let sampler = Sampler::with_config(Config::quick().reference(Matrix::zeros(1, 2)));
    match sampler.run(&model) {
        Err(SamplerError::InvalidConfig(msg)) => assert!(msg.contains("square")),
        other => panic!("expected InvalidConfig, got {:?}", other.map(|p| p.len())),
    }
}

// =============================================================================
// POLICY
// =============================================================================

#[test]
fn policy_defaults_to_fail_closed() {
    assert_eq!(NormalizationPolicy::default(), NormalizationPolicy::FailClosed);
    assert_eq!(Config::thorough().normalization_policy, NormalizationPolicy::FailClosed);
}

#[test]
fn policy_from_env_falls_back_to_default() {
    if std::env::var("GENNORM_NORMALIZATION_POLICY").is_err() {
        assert_eq!(
            NormalizationPolicy::from_env_or(NormalizationPolicy::FailOpen),
            NormalizationPolicy::FailOpen
        );
    }
}
