use std::f64::consts::{PI, SQRT_2};

/// Standard normal CDF Phi(x) = erfc(-x/sqrt(2)) / 2.
///
/// erfc keeps full relative precision in the lower tail, where 1 + erf(x)
/// would cancel, so Phi(x) + Phi(-x) = 1 holds to rounding.
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x / SQRT_2)
}

/// Standard normal PDF phi(x) = exp(-x^2/2) / sqrt(2*pi).
#[inline]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}
