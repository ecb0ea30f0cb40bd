// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = EMA_{t-1} + (close_t - EMA_{t-1}) * multiplier
//
// The very first EMA value is seeded with the SMA of the first `period` closes.
// =============================================================================

/// Compute the EMA series for the given `series` slice and look-back `period`.
///
/// Returns an empty `Vec` when the input is too short or the period is zero.
/// Each output element corresponds to a value starting at index `period - 1`.
///
/// # Edge cases
/// - `period == 0` => empty vec (division by zero guard)
/// - `series.len() < period` => empty vec
/// - A non-finite intermediate value ends the series early.
pub fn calculate_ema(series: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || series.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let sma: f64 = series[..period].iter().sum::<f64>() / period as f64;
    if !sma.is_finite() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(series.len() - period + 1);
    result.push(sma);

    let mut ema = sma;
    for &price in &series[period..] {
        ema += (price - ema) * multiplier;
        if !ema.is_finite() {
            break;
        }
        result.push(ema);
    }

    result
}

/// Most recent EMA value, or `None` when `series.len() < period`.
pub fn compute_ema(series: &[f64], period: usize) -> Option<f64> {
    calculate_ema(series, period).last().copied()
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a simple ascending price series.
    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    // ---- calculate_ema ---------------------------------------------------

    #[test]
    fn ema_empty_input() {
        assert!(calculate_ema(&[], 5).is_empty());
        assert!(compute_ema(&[], 5).is_none());
    }

    #[test]
    fn ema_period_zero() {
        assert!(calculate_ema(&[1.0, 2.0, 3.0], 0).is_empty());
        assert!(compute_ema(&[1.0, 2.0, 3.0], 0).is_none());
    }

    #[test]
    fn ema_insufficient_data() {
        assert!(compute_ema(&[1.0, 2.0], 5).is_none());
    }

    #[test]
    fn ema_period_equals_length_is_sma() {
        let ema = compute_ema(&[2.0, 4.0, 6.0], 3).unwrap();
        assert!((ema - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // 5-period EMA of [1..=10]: SMA seed 3.0, multiplier 1/3.
        let closes = ascending(10);
        let series = calculate_ema(&closes, 5);
        assert_eq!(series.len(), 6);

        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        for &c in &closes[5..] {
            expected += (c - expected) * mult;
        }
        let last = compute_ema(&closes, 5).unwrap();
        assert!((last - expected).abs() < 1e-10, "got {last}, expected {expected}");
    }

    #[test]
    fn ema_constant_series_is_fixed_point() {
        for period in [1usize, 2, 9, 21, 50] {
            let series = vec![42.5; 80];
            let ema = compute_ema(&series, period).unwrap();
            assert!((ema - 42.5).abs() < 1e-9, "period {period} gave {ema}");
        }
    }

    #[test]
    fn ema_stays_within_series_bounds() {
        let series: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 12.0 + (i % 7) as f64)
            .collect();
        let lo = series.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = series.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for period in [3usize, 9, 21, 50, 120] {
            let ema = compute_ema(&series, period).unwrap();
            assert!(ema >= lo && ema <= hi, "period {period}: {ema} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn ema_handles_nan_in_input() {
        let series = calculate_ema(&[1.0, 2.0, 3.0, f64::NAN, 5.0], 3);
        // Seed survives, the NaN ends the series.
        assert_eq!(series.len(), 1);
    }
}
