// =============================================================================
// Directional Index (DI+ / DI- / "ADX")
// =============================================================================
//
// Calculation pipeline:
//   1. Compute +DM (positive directional movement) and -DM per bar.
//   2. Compute True Range (TR) per bar.
//   3. Apply Wilder's smoothing (period) to +DM, -DM, and TR.
//   4. Derive +DI = smoothed(+DM) / smoothed(TR) * 100
//            -DI = smoothed(-DM) / smoothed(TR) * 100
//   5. DX  = |+DI - -DI| / (+DI + -DI) * 100
//
// The value reported as `adx` is the single-period DX from step 5.  It is NOT
// smoothed over a second window the way textbook ADX is, so it reacts faster
// and is noisier.  Downstream thresholds (trend strength, trending score) were
// calibrated against this approximation; keep it.
//
// Interpretation:
//   ADX > 25  => trending market
//   ADX < 20  => ranging / choppy market
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::market_data::Candle;

/// Directional index output.  All three values lie in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalIndex {
    /// Single-period DX, reported as ADX (see module docs).
    pub adx: f64,
    pub di_plus: f64,
    pub di_minus: f64,
}

/// Wilder-smoothed *average* of `values`.
///
/// Seeds with the sum of the first `period` values, applies
/// `s = s - s / period + v` for the rest and returns `s / period`.  Returning
/// the average rather than the running sum keeps TR, +DM and -DM in the same
/// unit so their ratios cancel.
///
/// Returns 0.0 when `period` is zero or fewer than `period` values exist.
pub fn wilder_smooth(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        return 0.0;
    }

    let period_f = period as f64;
    let mut smooth: f64 = values[..period].iter().sum();
    for &value in &values[period..] {
        smooth = smooth - smooth / period_f + value;
    }

    smooth / period_f
}

/// Compute DI+/DI-/ADX from a slice of candles (oldest first).
///
/// Returns `None` when `period` is zero or fewer than `period + 1` candles are
/// supplied.
pub fn compute_directional_index(candles: &[Candle], period: usize) -> Option<DirectionalIndex> {
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    // ------------------------------------------------------------------
    // Raw +DM, -DM, and True Range for each consecutive pair
    // ------------------------------------------------------------------
    let bar_count = candles.len() - 1;
    let mut plus_dm = Vec::with_capacity(bar_count);
    let mut minus_dm = Vec::with_capacity(bar_count);
    let mut tr_vals = Vec::with_capacity(bar_count);

    for pair in candles.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);

        let tr = (cur.high - cur.low)
            .max((cur.high - prev.close).abs())
            .max((cur.low - prev.close).abs());

        let up_move = cur.high - prev.high;
        let down_move = prev.low - cur.low;

        let pdm = if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        };
        let mdm = if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        };

        plus_dm.push(pdm);
        minus_dm.push(mdm);
        tr_vals.push(tr);
    }

    // ------------------------------------------------------------------
    // Wilder smoothing and DI / DX
    // ------------------------------------------------------------------
    let smooth_tr = wilder_smooth(&tr_vals, period);
    let smooth_plus = wilder_smooth(&plus_dm, period);
    let smooth_minus = wilder_smooth(&minus_dm, period);

    let (di_plus, di_minus) = if smooth_tr > 0.0 && smooth_tr.is_finite() {
        (
            clamp_pct(100.0 * smooth_plus / smooth_tr),
            clamp_pct(100.0 * smooth_minus / smooth_tr),
        )
    } else {
        (0.0, 0.0)
    };

    let di_sum = di_plus + di_minus;
    let dx = if di_sum > 0.0 {
        clamp_pct(100.0 * (di_plus - di_minus).abs() / di_sum)
    } else {
        0.0
    };

    Some(DirectionalIndex {
        adx: dx,
        di_plus,
        di_minus,
    })
}

/// Pin a percentage into `[0, 100]`; NaN collapses to 0.
fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn candle(open: f64, high: f64, low: f64, close: f64) -> Candle {
        Candle::new(open, high, low, close)
    }

    // ---- wilder_smooth ---------------------------------------------------

    #[test]
    fn wilder_insufficient_values() {
        assert_eq!(wilder_smooth(&[1.0, 2.0], 3), 0.0);
        assert_eq!(wilder_smooth(&[1.0, 2.0], 0), 0.0);
    }

    #[test]
    fn wilder_seed_only_is_mean() {
        assert!((wilder_smooth(&[2.0, 4.0, 6.0], 3) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn wilder_known_values() {
        // seed = 1+2+3 = 6; next: 6 - 2 + 4 = 8; avg = 8/3
        let v = wilder_smooth(&[1.0, 2.0, 3.0, 4.0], 3);
        assert!((v - 8.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn wilder_constant_is_fixed_point() {
        let v = wilder_smooth(&[5.0; 40], 14);
        assert!((v - 5.0).abs() < 1e-10);
    }

    // ---- compute_directional_index ---------------------------------------

    #[test]
    fn di_period_zero() {
        let candles = vec![candle(1.0, 2.0, 0.5, 1.5); 50];
        assert!(compute_directional_index(&candles, 0).is_none());
    }

    #[test]
    fn di_insufficient_data() {
        let candles = vec![candle(1.0, 2.0, 0.5, 1.5); 14];
        assert!(compute_directional_index(&candles, 14).is_none());
    }

    #[test]
    fn di_minimum_candles_exact() {
        let period = 5;
        let candles: Vec<Candle> = (0..=period)
            .map(|i| {
                let base = 100.0 + i as f64;
                candle(base, base + 1.0, base - 0.5, base + 0.5)
            })
            .collect();
        assert!(compute_directional_index(&candles, period).is_some());
        assert!(compute_directional_index(&candles[..period], period).is_none());
    }

    #[test]
    fn di_strong_uptrend() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| {
                let base = 100.0 + i as f64 * 2.0;
                candle(base, base + 1.5, base - 0.5, base + 1.0)
            })
            .collect();

        let di = compute_directional_index(&candles, 14).unwrap();
        assert!(di.di_plus > di.di_minus);
        assert!(di.adx > 25.0, "expected ADX > 25 for strong trend, got {}", di.adx);
    }

    #[test]
    fn di_strong_downtrend() {
        let candles: Vec<Candle> = (0..60)
            .map(|i| {
                let base = 300.0 - i as f64 * 2.0;
                candle(base, base + 0.5, base - 1.5, base - 1.0)
            })
            .collect();

        let di = compute_directional_index(&candles, 14).unwrap();
        assert!(di.di_minus > di.di_plus);
        assert!(di.adx > 25.0);
    }

    #[test]
    fn di_flat_market_is_zero() {
        let candles = vec![candle(100.0, 101.0, 99.0, 100.0); 30];
        let di = compute_directional_index(&candles, 14).unwrap();
        assert_eq!(di.adx, 0.0);
        assert_eq!(di.di_plus, 0.0);
        assert_eq!(di.di_minus, 0.0);
    }

    #[test]
    fn di_zero_range_bars_do_not_divide_by_zero() {
        let candles = vec![candle(50.0, 50.0, 50.0, 50.0); 20];
        let di = compute_directional_index(&candles, 14).unwrap();
        assert_eq!(di.adx, 0.0);
    }

    #[test]
    fn di_values_stay_in_range() {
        let candles: Vec<Candle> = (0..100)
            .map(|i| {
                let base = 50.0 + (i as f64 * 0.3).sin() * 10.0;
                candle(base - 0.5, base + 1.0, base - 1.0, base + 0.5)
            })
            .collect();
        for period in [2usize, 7, 14, 30] {
            let di = compute_directional_index(&candles, period).unwrap();
            for v in [di.adx, di.di_plus, di.di_minus] {
                assert!((0.0..=100.0).contains(&v), "period {period}: {v} out of [0,100]");
            }
        }
    }
}
