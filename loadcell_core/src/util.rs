//! Integer helpers for averaging and offsets.

/// Divide `sum` by `n`, rounding to nearest with ties away from zero, and
/// clamp the result to the i32 range. `n == 0` yields 0.
#[inline]
pub fn div_round_nearest_i32(sum: i64, n: u32) -> i32 {
    if n == 0 {
        return 0;
    }
    let n = i64::from(n);
    let q = if sum >= 0 {
        (sum + n / 2) / n
    } else {
        (sum - n / 2) / n
    };
    clamp_i32(q)
}

/// `a - b` computed in 64 bits and clamped to i32.
#[inline]
pub fn offset_sub_i32(a: i32, b: i32) -> i32 {
    clamp_i32(i64::from(a) - i64::from(b))
}

#[inline]
fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 1, 10)]
    #[case(10, 4, 3)] // 2.5 -> 3
    #[case(-10, 4, -3)] // -2.5 -> -3
    #[case(9, 4, 2)]
    #[case(-9, 4, -2)]
    #[case(0, 0, 0)]
    fn rounding(#[case] sum: i64, #[case] n: u32, #[case] expected: i32) {
        assert_eq!(div_round_nearest_i32(sum, n), expected);
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(offset_sub_i32(i32::MIN, 1), i32::MIN);
        assert_eq!(offset_sub_i32(i32::MAX, -1), i32::MAX);
        assert_eq!(offset_sub_i32(100, 40), 60);
    }
}
