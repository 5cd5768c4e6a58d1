//! Positional slope tolerance.
//!
//! Each cell gets a fixed tolerance of 1 or 2 for how many empty cells may
//! sit beside a stack before its top grain is pushed sideways. Varying the
//! tolerance by position keeps piles from settling at one uniform angle.
//! The hash is pure: it never touches the frame RNG.

const X_SCALE: f64 = 312.5121;
const Y_SCALE: f64 = 5_125_613.123;

/// Slope tolerance at `(x, y)`. Always 1 or 2, for any input.
#[must_use]
pub fn max_slope(x: i64, y: i64) -> usize {
    let wave = 10.0 * (x as f64 * X_SCALE + y as f64 * Y_SCALE).sin();
    // NaN casts to 0
    let bucket = (wave as i64 % 2).unsigned_abs() as usize;
    bucket + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn origin_has_tolerance_one() {
        // sin(0) == 0
        assert_eq!(max_slope(0, 0), 1);
    }

    #[test]
    fn extreme_coordinates_stay_bounded() {
        for (x, y) in [
            (i64::MIN, i64::MIN),
            (i64::MAX, i64::MAX),
            (i64::MIN, i64::MAX),
            (-1, -1),
        ] {
            let s = max_slope(x, y);
            assert!(s == 1 || s == 2, "max_slope({x}, {y}) = {s}");
        }
    }

    #[test]
    fn neighbouring_columns_are_not_uniform() {
        let y = 100;
        let row: Vec<usize> = (0..256).map(|x| max_slope(x, y)).collect();
        let ones = row.iter().filter(|&&s| s == 1).count();
        assert!(ones > 32 && ones < 224, "row too uniform: {ones} ones of 256");

        let changes = row.windows(2).filter(|w| w[0] != w[1]).count();
        assert!(changes > 32, "only {changes} changes between adjacent columns");
    }

    proptest! {
        #[test]
        fn prop_max_slope_is_deterministic_and_bounded(x in any::<i64>(), y in any::<i64>()) {
            let first = max_slope(x, y);
            prop_assert!(first == 1 || first == 2);
            prop_assert_eq!(first, max_slope(x, y));
        }
    }
}
