/// Round a value to a fixed number of decimal places
///
/// Used for the progress values mirrored onto the slider parameter, which
/// the avatar only renders with two decimals of precision.
pub fn round_to_decimal(value: f64, decimal_places: u32) -> f64 {
    let shift = 10f64.powi(decimal_places as i32);
    (value * shift).round() / shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_two_decimals() {
        assert_eq!(round_to_decimal(0.699, 2), 0.7);
        assert_eq!(round_to_decimal(0.704, 2), 0.7);
        assert_eq!(round_to_decimal(0.706, 2), 0.71);
        assert_eq!(round_to_decimal(0.15, 2), 0.15);
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(round_to_decimal(-0.699, 2), -0.7);
        assert_eq!(round_to_decimal(-0.704, 2), -0.7);
    }

    #[test]
    fn test_zero_decimal_places() {
        assert_eq!(round_to_decimal(140000.4, 0), 140000.0);
        assert_eq!(round_to_decimal(140000.5, 0), 140001.0);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let values = [0.0, 0.005, 0.123456, 0.7, 0.999, 1.0, 1.5, -0.335, 12.345];
        for places in 0..4 {
            for value in values {
                let once = round_to_decimal(value, places);
                assert_eq!(round_to_decimal(once, places), once,
                    "round({}, {}) not idempotent", value, places);
            }
        }
    }
}
