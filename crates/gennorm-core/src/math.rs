//! Math functions for no_std compatibility.
//!
//! In no_std mode, f64 doesn't have transcendental methods like sqrt, ln, exp, etc.
//! This module provides these functions using libm.

/// Square root.
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Natural logarithm.
#[inline]
pub fn ln(x: f64) -> f64 {
    libm::log(x)
}

/// Exponential (e^x).
#[inline]
pub fn exp(x: f64) -> f64 {
    libm::exp(x)
}

/// Power (x^y).
#[inline]
pub fn pow(x: f64, y: f64) -> f64 {
    libm::pow(x, y)
}

/// Cosine.
#[inline]
pub fn cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Arc cosine.
#[inline]
pub fn acos(x: f64) -> f64 {
    libm::acos(x)
}

/// Floor (round down).
#[inline]
pub fn floor(x: f64) -> f64 {
    libm::floor(x)
}

/// Log-gamma function ln Γ(x) for x > 0.
#[inline]
pub fn ln_gamma(x: f64) -> f64 {
    libm::lgamma(x)
}

/// Square (x^2).
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

/// Absolute value.
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Log density of a Gamma distribution in the shape-scale parameterization.
///
/// ```text
/// ln f(x; k, θ) = (k - 1) ln x - x/θ - k ln θ - ln Γ(k)
/// ```
///
/// Returns `-inf` for `x <= 0`.
pub fn gamma_ln_pdf(x: f64, shape: f64, scale: f64) -> f64 {
    if x <= 0.0 {
        return f64::NEG_INFINITY;
    }
    (shape - 1.0) * ln(x) - x / scale - shape * ln(scale) - ln_gamma(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gamma_ln_pdf_exponential() {
        // Gamma(1, θ) is Exponential with mean θ: f(x) = e^{-x/θ}/θ
        let x = 0.7;
        let scale = 2.0;
        let expected = -x / scale - ln(scale);
        assert!((gamma_ln_pdf(x, 1.0, scale) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_gamma_ln_pdf_non_positive() {
        assert_eq!(gamma_ln_pdf(0.0, 2.0, 1.0), f64::NEG_INFINITY);
        assert_eq!(gamma_ln_pdf(-1.0, 2.0, 1.0), f64::NEG_INFINITY);
    }
}
