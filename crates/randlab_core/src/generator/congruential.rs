//! Congruential generators.
//!
//! Arithmetic is carried out in `u128` so any 64-bit multiplier, increment
//! and state can be combined without overflow.

/// Largest `f64` strictly below one.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// One linear congruential step: `x <- (a*x + c) mod m`, output `x / m`.
///
/// `m` must be non-zero; [`super::GeneratorParams::validate`] guarantees it.
#[inline]
pub(crate) fn linear_step(x: u64, a: u64, c: u64, m: u64) -> (f64, u64) {
    let next = (u128::from(a) * u128::from(x) + u128::from(c)) % u128::from(m);
    // next < m <= u64::MAX
    let next = next as u64;
    // For m above 2^53 the quotient can round up to exactly 1.0.
    ((next as f64 / m as f64).min(BELOW_ONE), next)
}

/// One multiplicative congruential step: `x <- (a*x) mod m`, output `x / m`.
#[inline]
pub(crate) fn multiplicative_step(x: u64, a: u64, m: u64) -> (f64, u64) {
    linear_step(x, a, 0, m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_sequence() {
        let mut x = 7;
        let mut states = Vec::new();
        for _ in 0..3 {
            let (_, next) = linear_step(x, 5, 3, 10_007);
            states.push(next);
            x = next;
        }
        assert_eq!(states, vec![38, 193, 968]);
    }

    #[test]
    fn test_multiplicative_sequence() {
        let (u1, x1) = multiplicative_step(7, 5, 10_007);
        let (u2, x2) = multiplicative_step(x1, 5, 10_007);
        assert_eq!((x1, x2), (35, 175));
        assert_eq!(u1, 35.0 / 10_007.0);
        assert_eq!(u2, 175.0 / 10_007.0);
    }

    #[test]
    fn test_no_overflow_at_extremes() {
        let (value, next) = linear_step(u64::MAX, u64::MAX, u64::MAX, u64::MAX - 1);
        assert!(next < u64::MAX - 1);
        assert!((0.0..1.0).contains(&value));
    }
}
