//! Middle-digit generators (von Neumann's middle-square and middle-product).
//!
//! Both take a product, zero-pad it to at least eight decimal digits, and keep
//! the four digits at positions 2..6 counted from the left.

/// Width the product is zero-padded to before extraction.
const PADDED_DIGITS: u32 = 8;

/// Extracts the four digits at positions 2..6 of `n` padded to eight digits.
///
/// Products wider than eight digits keep the same left-anchored window.
#[inline]
pub(crate) fn middle_digits(n: u128) -> u64 {
    let width = decimal_width(n).max(PADDED_DIGITS);
    ((n / 10u128.pow(width - 6)) % 10_000) as u64
}

fn decimal_width(n: u128) -> u32 {
    if n == 0 {
        1
    } else {
        n.ilog10() + 1
    }
}

/// One middle-square step: returns the output and the next state.
#[inline]
pub(crate) fn middle_square_step(x: u64) -> (f64, u64) {
    let square = u128::from(x) * u128::from(x);
    let next = middle_digits(square);
    (next as f64 / 10_000.0, next)
}

/// One middle-product step on the state pair `(x0, x1)`.
#[inline]
pub(crate) fn middle_product_step((x0, x1): (u64, u64)) -> (f64, (u64, u64)) {
    let product = u128::from(x0) * u128::from(x1);
    let medio = middle_digits(product);
    (medio as f64 / 10_000.0, (x1, medio))
}
