// Output-boundary rounding.  Engines compute at full precision and only round
// when filling the structs they return.

/// Round to `decimals` places; non-finite input passes through unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Two decimals for percentages, spreads and ratios.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Prices: two decimals, four for sub-$1 quotes (RB, HG, FX crosses).
pub fn round_price(price: f64) -> f64 {
    if price.abs() < 1.0 {
        round_to(price, 4)
    } else {
        round_to(price, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(1.2999999), 1.3);
        assert_eq!(round2(-0.306), -0.31);
        assert_eq!(round2(90.0), 90.0);
    }

    #[test]
    fn sub_dollar_prices_keep_four_decimals() {
        assert_eq!(round_price(0.65437), 0.6544);
        assert_eq!(round_price(2.1049), 2.1);
        assert_eq!(round_price(71.256), 71.26);
    }

    #[test]
    fn non_finite_passes_through() {
        assert!(round2(f64::NAN).is_nan());
    }
}
