//! Shift-register generators on 32-bit state.
//!
//! Both reduce the state to four decimal digits for output, so values are
//! multiples of 1e-4 in [0, 1).

/// Feedback mask of the Tausworthe-style recurrence.
const TAUSWORTHE_FEEDBACK: u32 = 0x8ebf_d028;

#[inline]
fn four_digit_fraction(x: u32) -> f64 {
    f64::from(x % 10_000) / 10_000.0
}

/// One Marsaglia xorshift32 step with shifts (13, 17, 5).
#[inline]
pub(crate) fn xorshift32_step(mut x: u32) -> (f64, u32) {
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    (four_digit_fraction(x), x)
}

/// One Tausworthe-like step: shift left and fold the carried-out top bit
/// back in through the feedback mask.
#[inline]
pub(crate) fn tausworthe_step(s: u32) -> (f64, u32) {
    let next = (s << 1) ^ ((s >> 31) * TAUSWORTHE_FEEDBACK);
    (four_digit_fraction(next), next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xorshift_known_step() {
        // x = 1: 1 ^ (1 << 13) = 8193; 8193 >> 17 = 0; 8193 ^ (8193 << 5) = 270369
        let (value, next) = xorshift32_step(1);
        assert_eq!(next, 270_369);
        assert_eq!(value, 0.0369);
    }

    #[test]
    fn test_xorshift_zero_is_fixed_point() {
        assert_eq!(xorshift32_step(0), (0.0, 0));
    }

    #[test]
    fn test_tausworthe_without_carry() {
        let (value, next) = tausworthe_step(24_680);
        assert_eq!(next, 49_360);
        assert_eq!(value, 0.936);
    }

    #[test]
    fn test_tausworthe_with_carry() {
        let (_, next) = tausworthe_step(0x8000_0001);
        assert_eq!(next, 0x0000_0002 ^ TAUSWORTHE_FEEDBACK);
    }
}
