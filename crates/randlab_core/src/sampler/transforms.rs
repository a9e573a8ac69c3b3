//! Closed-form transforms from uniforms to distribution samples.

use std::f64::consts::PI;

/// Maps `u` linearly onto `[a, b)`.
#[inline]
pub(crate) fn uniform(u: f64, a: f64, b: f64) -> f64 {
    a + (b - a) * u
}

/// Inverse-CDF exponential sample, or `None` when `u <= 0` (or NaN).
#[inline]
pub(crate) fn exponential(u: f64, lambda: f64) -> Option<f64> {
    if u > 0.0 {
        Some(-u.ln() / lambda)
    } else {
        None
    }
}

/// Standard normal variate from the cosine branch of Box–Muller.
///
/// Returns `None` when `u1` is outside (0, 1], where the radius is not finite.
#[inline]
pub(crate) fn box_muller(u1: f64, u2: f64) -> Option<f64> {
    if u1 > 0.0 && u1 <= 1.0 {
        Some((-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos())
    } else {
        None
    }
}

/// Knuth's Poisson count with a single draw reused at every step.
///
/// Counts how many times `u` can be multiplied into the running product
/// before it drops below `e^-lambda`, minus one. Compared in log space,
/// `u^k >= e^-lambda` becomes `k * ln(u) >= -lambda`, which gives the count
/// directly and stays finite for any `lambda`. Requires `0 <= u < 1`.
#[inline]
pub(crate) fn poisson_single_draw(u: f64, lambda: f64) -> f64 {
    if u <= 0.0 {
        return 0.0;
    }
    (lambda / -u.ln()).floor()
}

/// Reference binomial count: the same draw compared against `p` for all
/// `n` trials, so the result is either `0` or `n`.
#[inline]
pub(crate) fn binomial_single_draw(u: f64, n: u64, p: f64) -> f64 {
    if u <= p {
        n as f64
    } else {
        0.0
    }
}

/// Textbook binomial count: number of independent draws with `u <= p`.
#[inline]
pub(crate) fn bernoulli_sum(trials: &[f64], p: f64) -> f64 {
    trials.iter().filter(|&&u| u <= p).count() as f64
}
