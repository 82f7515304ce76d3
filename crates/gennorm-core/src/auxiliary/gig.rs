//! Generalized inverse Gaussian variates.
//!
//! Density, for `x > 0`:
//!
//! ```text
//! f(x; λ, χ, ψ) ∝ x^(λ−1) · exp(−(χ/x + ψx)/2)
//! ```
//!
//! Sampling follows Hörmann & Leydold (2014), "Generating generalized
//! inverse Gaussian random variates", Statistics and Computing 24. The
//! standardized two-parameter form with `ω = √(χψ)` and `λ ≥ 0` is sampled
//! by one of three rejection methods and scaled back by `α = √(χ/ψ)`.

use core::f64::consts::PI;

use rand::Rng;

use super::{gamma_rate, inverse_gamma, open_uniform};
use crate::constants::GIG_ZERO_TOLERANCE;
use crate::error::{GennormError, Result};
use crate::math;

/// Draw one GIG(λ, χ, ψ) variate.
///
/// When `χ` (or `ψ`) is below [`GIG_ZERO_TOLERANCE`] the law degenerates to
/// a Gamma (or inverse Gamma) distribution, which is sampled directly.
///
/// # Errors
///
/// [`GennormError::InvalidParameter`] if any parameter is non-finite,
/// `χ < 0`, `ψ < 0`, or `χ = 0` with `λ ≤ 0`, or `ψ = 0` with `λ ≥ 0`.
pub fn gig<R: Rng + ?Sized>(lambda: f64, chi: f64, psi: f64, rng: &mut R) -> Result<f64> {
    if !lambda.is_finite() {
        return Err(GennormError::InvalidParameter {
            name: "gig lambda",
            value: lambda,
        });
    }
    if !chi.is_finite() || chi < 0.0 || (chi == 0.0 && lambda <= 0.0) {
        return Err(GennormError::InvalidParameter {
            name: "gig chi",
            value: chi,
        });
    }
    if !psi.is_finite() || psi < 0.0 || (psi == 0.0 && lambda >= 0.0) {
        return Err(GennormError::InvalidParameter {
            name: "gig psi",
            value: psi,
        });
    }

    if chi < GIG_ZERO_TOLERANCE {
        // Gamma(λ, rate ψ/2)
        return if lambda > 0.0 {
            gamma_rate(lambda, psi / 2.0, "gig psi", rng)
        } else {
            inverse_gamma(-lambda, psi / 2.0, "gig psi", rng)
        };
    }
    if psi < GIG_ZERO_TOLERANCE {
        // Inverse Gamma(−λ, rate χ/2)
        return if lambda > 0.0 {
            inverse_gamma(lambda, chi / 2.0, "gig chi", rng)
        } else {
            inverse_gamma(-lambda, chi / 2.0, "gig chi", rng)
        };
    }

    let negative = lambda < 0.0;
    let lambda = math::abs(lambda);
    let alpha = math::sqrt(chi / psi);
    let omega = math::sqrt(chi * psi);

    let x = if lambda > 2.0 || omega > 3.0 {
        ratio_of_uniforms_shifted(lambda, omega, rng)
    } else if lambda >= 1.0 - 2.25 * omega * omega || omega > 0.2 {
        ratio_of_uniforms(lambda, omega, rng)
    } else {
        concave_rejection(lambda, omega, rng)
    };

    Ok(if negative { alpha / x } else { alpha * x })
}

/// Mode of the standardized density.
fn mode(lambda: f64, omega: f64) -> f64 {
    if lambda >= 1.0 {
        (math::sqrt(math::sq(lambda - 1.0) + omega * omega) + (lambda - 1.0)) / omega
    } else {
        omega / (math::sqrt(math::sq(1.0 - lambda) + omega * omega) + (1.0 - lambda))
    }
}

/// Log of the standardized density up to a constant, with `t = (λ−1)/2`
/// and `s = ω/4` (this is the log of its square root).
#[inline]
fn half_log_density(x: f64, t: f64, s: f64) -> f64 {
    t * math::ln(x) - s * (x + 1.0 / x)
}

/// Ratio-of-uniforms without mode shift, for `0.2 < ω ≤ 3` or large λ.
fn ratio_of_uniforms<R: Rng + ?Sized>(lambda: f64, omega: f64, rng: &mut R) -> f64 {
    let t = 0.5 * (lambda - 1.0);
    let s = 0.25 * omega;
    let xm = mode(lambda, omega);
    let nc = half_log_density(xm, t, s);

    let ym = ((lambda + 1.0) + math::sqrt(math::sq(lambda + 1.0) + omega * omega)) / omega;
    let um = math::exp(0.5 * (lambda + 1.0) * math::ln(ym) - s * (ym + 1.0 / ym) - nc);

    loop {
        let u = um * open_uniform(rng);
        let v = open_uniform(rng);
        let x = u / v;
        if math::ln(v) <= half_log_density(x, t, s) - nc {
            return x;
        }
    }
}

/// Ratio-of-uniforms shifted by the mode, for `λ > 2` or `ω > 3`.
///
/// The bounding rectangle comes from the roots of a cubic, solved with
/// the trigonometric method.
fn ratio_of_uniforms_shifted<R: Rng + ?Sized>(lambda: f64, omega: f64, rng: &mut R) -> f64 {
    let t = 0.5 * (lambda - 1.0);
    let s = 0.25 * omega;
    let xm = mode(lambda, omega);
    let nc = half_log_density(xm, t, s);

    let a = -(2.0 * (lambda + 1.0) / omega + xm);
    let b = 2.0 * (lambda - 1.0) * xm / omega - 1.0;
    let c = xm;

    let p = b - a * a / 3.0;
    let q = (2.0 * a * a * a) / 27.0 - (a * b) / 3.0 + c;
    let phi = math::acos(-q / (2.0 * math::sqrt(-(p * p * p) / 27.0)));
    let scale = 2.0 * math::sqrt(-p / 3.0);

    let y1 = scale * math::cos(phi / 3.0) - a / 3.0;
    let y2 = scale * math::cos(phi / 3.0 + 4.0 / 3.0 * PI) - a / 3.0;
    let u_plus = (y1 - xm) * math::exp(half_log_density(y1, t, s) - nc);
    let u_minus = (y2 - xm) * math::exp(half_log_density(y2, t, s) - nc);

    loop {
        let u = u_minus + open_uniform(rng) * (u_plus - u_minus);
        let v = open_uniform(rng);
        let x = u / v + xm;
        if x > 0.0 && math::ln(v) <= half_log_density(x, t, s) - nc {
            return x;
        }
    }
}

/// Rejection from a three-piece hat for `λ < 1` and `ω ≤ 0.2`, where the
/// density is T₋½-concave and neither ratio-of-uniforms method is efficient.
fn concave_rejection<R: Rng + ?Sized>(lambda: f64, omega: f64, rng: &mut R) -> f64 {
    let xm = mode(lambda, omega);
    let x0 = omega / (1.0 - lambda);
    let two_over_omega = 2.0 / omega;

    let k0 = math::exp((lambda - 1.0) * math::ln(xm) - 0.5 * omega * (xm + 1.0 / xm));
    let a0 = k0 * x0;

    let (k1, a1, k2, a2) = if x0 >= two_over_omega {
        let k2 = math::pow(x0, lambda - 1.0);
        (0.0, 0.0, k2, k2 * 2.0 * math::exp(-omega * x0 / 2.0) / omega)
    } else {
        let k1 = math::exp(-omega);
        let a1 = if lambda == 0.0 {
            k1 * math::ln(2.0 / (omega * omega))
        } else {
            k1 / lambda * (math::pow(two_over_omega, lambda) - math::pow(x0, lambda))
        };
        let k2 = math::pow(two_over_omega, lambda - 1.0);
        (k1, a1, k2, k2 * 2.0 * math::exp(-1.0) / omega)
    };
    let total = a0 + a1 + a2;
    let tail_start = x0.max(two_over_omega);

    loop {
        let mut v = total * open_uniform(rng);
        let (x, hat) = if v <= a0 {
            (x0 * v / a0, k0)
        } else {
            v -= a0;
            if v <= a1 {
                if lambda == 0.0 {
                    let x = omega * math::exp(math::exp(omega) * v);
                    (x, k1 / x)
                } else {
                    let x = math::pow(math::pow(x0, lambda) + lambda / k1 * v, 1.0 / lambda);
                    (x, k1 * math::pow(x, lambda - 1.0))
                }
            } else {
                v -= a1;
                let x = -two_over_omega
                    * math::ln(math::exp(-omega / 2.0 * tail_start) - omega / (2.0 * k2) * v);
                (x, k2 * math::exp(-omega / 2.0 * x))
            }
        };

        let u = open_uniform(rng) * hat;
        if math::ln(u) <= (lambda - 1.0) * math::ln(x) - omega / 2.0 * (x + 1.0 / x) {
            return x;
        }
    }
}
