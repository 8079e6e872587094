//! Coordinate rounding and comparison helpers.

/// Decimal places used when deciding whether the map really moved.
///
/// Viewport resize reflows perturb the center by less than 1e-5 degrees.
pub const COORDINATE_PRECISION: u32 = 5;

/// Rounds `value` to `places` decimal digits, ties toward positive infinity.
pub fn round_to_decimal(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor + 0.5).floor() / factor
}

/// True when `a` and `b` are equal after rounding both to `places` digits.
pub fn is_rounded_equal(a: f64, b: f64, places: u32) -> bool {
    round_to_decimal(a, places) == round_to_decimal(b, places)
}

/// Label used for a manually placed pin: `"<lat>, <lon>"`.
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!("{}, {}", latitude, longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_decimal() {
        assert_eq!(round_to_decimal(1.23456, 2), 1.23);
        assert_eq!(round_to_decimal(1.235, 0), 1.0);
        assert_eq!(round_to_decimal(2.5, 0), 3.0);
        assert_eq!(round_to_decimal(-2.5, 0), -2.0);
    }

    #[test]
    fn test_is_rounded_equal_ignores_sub_epsilon_jitter() {
        assert!(is_rounded_equal(40.712800001, 40.712801, 5));
    }

    #[test]
    fn test_is_rounded_equal_detects_fifth_decimal_change() {
        assert!(!is_rounded_equal(40.71275, 40.71285, 5));
    }

    #[test]
    fn test_format_coordinates() {
        assert_eq!(format_coordinates(51.5034, -0.1276), "51.5034, -0.1276");
    }
}
