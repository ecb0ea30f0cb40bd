// =============================================================================
// Trend Analysis - EMA stack + directional index per instrument
// =============================================================================
//
// Evaluates where the current price sits relative to the fast / medium / slow
// EMA stack and how strong the underlying move is according to the
// directional index.
//
// Trend ladder (evaluated top-to-bottom; first match wins):
//
//   1. price > EMA9, EMA21, EMA50   => Strong Bullish  (+2)
//   2. price > EMA9, EMA21          => Bullish         (+1)
//   3. price < EMA9, EMA21, EMA50   => Strong Bearish  (-2)
//   4. price < EMA9, EMA21          => Bearish         (-1)
//   5. EMA9 > EMA21                 => Slight Bullish  (+0.5)
//   6. EMA9 < EMA21                 => Slight Bearish  (-0.5)
//   7. otherwise                    => Neutral         (0)
//
// Strength from ADX: <20 Weak, <25 Moderate, <40 Strong, else Very Strong.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TechnicalParams;
use crate::indicators::{compute_directional_index, compute_ema, DirectionalIndex};
use crate::market_data::Candle;
use crate::signals::{round2, round_price, Bound, Ladder};

// =============================================================================
// Types
// =============================================================================

/// Qualitative trend read from price vs the EMA stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendLabel {
    #[serde(rename = "Strong Bullish")]
    StrongBullish,
    Bullish,
    #[serde(rename = "Slight Bullish")]
    SlightBullish,
    Neutral,
    #[serde(rename = "Slight Bearish")]
    SlightBearish,
    Bearish,
    #[serde(rename = "Strong Bearish")]
    StrongBearish,
}

impl TrendLabel {
    /// Numeric signal in [-2, +2].
    pub fn signal(self) -> f64 {
        match self {
            Self::StrongBullish => 2.0,
            Self::Bullish => 1.0,
            Self::SlightBullish => 0.5,
            Self::Neutral => 0.0,
            Self::SlightBearish => -0.5,
            Self::Bearish => -1.0,
            Self::StrongBearish => -2.0,
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBullish => write!(f, "Strong Bullish"),
            Self::Bullish => write!(f, "Bullish"),
            Self::SlightBullish => write!(f, "Slight Bullish"),
            Self::Neutral => write!(f, "Neutral"),
            Self::SlightBearish => write!(f, "Slight Bearish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::StrongBearish => write!(f, "Strong Bearish"),
        }
    }
}

/// Trend strength bucket derived from the ADX value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl std::fmt::Display for TrendStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weak => write!(f, "Weak"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Strong => write!(f, "Strong"),
            Self::VeryStrong => write!(f, "Very Strong"),
        }
    }
}

/// Direction of the dominant directional indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
        }
    }
}

/// Full technical read of one price series.
///
/// When `available` is false only `reason` and the input counts are set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalResult {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub price: Option<f64>,
    pub ema_fast: Option<f64>,
    pub ema_medium: Option<f64>,
    pub ema_slow: Option<f64>,
    pub trend: Option<TrendLabel>,
    pub trend_signal: f64,
    /// Single-period DX (see `indicators::adx`).
    pub adx: Option<f64>,
    pub di_plus: Option<f64>,
    pub di_minus: Option<f64>,
    pub trend_strength: Option<TrendStrength>,
    pub trend_direction: Option<TrendDirection>,
    pub closes_used: usize,
    pub candles_used: usize,
    /// Unrounded directional index, for scoring.
    #[serde(skip)]
    pub directional: Option<DirectionalIndex>,
}

impl TechnicalResult {
    /// Result for a series too short (or too broken) to analyse.
    pub fn unavailable(reason: impl Into<String>, closes: usize, candles: usize) -> Self {
        Self {
            available: false,
            reason: Some(reason.into()),
            price: None,
            ema_fast: None,
            ema_medium: None,
            ema_slow: None,
            trend: None,
            trend_signal: 0.0,
            adx: None,
            di_plus: None,
            di_minus: None,
            trend_strength: None,
            trend_direction: None,
            closes_used: closes,
            candles_used: candles,
            directional: None,
        }
    }
}

// =============================================================================
// Classification logic
// =============================================================================

/// Place `price` against the EMA stack.
pub fn classify_trend(price: f64, ema_fast: f64, ema_medium: f64, ema_slow: f64) -> TrendLabel {
    let above_fast = price > ema_fast;
    let above_medium = price > ema_medium;
    let above_slow = price > ema_slow;
    let below_fast = price < ema_fast;
    let below_medium = price < ema_medium;
    let below_slow = price < ema_slow;

    if above_fast && above_medium && above_slow {
        TrendLabel::StrongBullish
    } else if above_fast && above_medium {
        TrendLabel::Bullish
    } else if below_fast && below_medium && below_slow {
        TrendLabel::StrongBearish
    } else if below_fast && below_medium {
        TrendLabel::Bearish
    } else if ema_fast > ema_medium {
        TrendLabel::SlightBullish
    } else if ema_fast < ema_medium {
        TrendLabel::SlightBearish
    } else {
        TrendLabel::Neutral
    }
}

fn strength_ladder() -> Ladder<TrendStrength> {
    Ladder::new()
        .rung(Bound::Below(20.0), "Weak", TrendStrength::Weak)
        .rung(Bound::Below(25.0), "Moderate", TrendStrength::Moderate)
        .rung(Bound::Below(40.0), "Strong", TrendStrength::Strong)
        .otherwise("Very Strong", TrendStrength::VeryStrong)
}

/// Bucket an ADX value into a strength label.
pub fn classify_strength(adx: f64) -> TrendStrength {
    strength_ladder()
        .classify(adx)
        .map(|r| r.signal)
        .unwrap_or(TrendStrength::Weak)
}

/// Direction from the dominant directional indicator.
pub fn classify_direction(di_plus: f64, di_minus: f64) -> TrendDirection {
    if di_plus > di_minus {
        TrendDirection::Bullish
    } else if di_minus > di_plus {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    }
}

// =============================================================================
// Entry points
// =============================================================================

/// Analyse a close series and candle series with the default periods
/// (EMA 9/21/50, directional index 14, at least 50 closes).
pub fn analyze_series(closes: &[f64], candles: &[Candle]) -> TechnicalResult {
    analyze_series_with(&TechnicalParams::default(), closes, candles)
}

/// Analyse with explicit periods.
///
/// Fewer than `min_closes` closes makes the result unavailable.  Too few
/// candles for the directional index only blanks the ADX/DI fields.
pub fn analyze_series_with(
    params: &TechnicalParams,
    closes: &[f64],
    candles: &[Candle],
) -> TechnicalResult {
    let min_closes = params
        .min_closes
        .max(params.ema_fast)
        .max(params.ema_medium)
        .max(params.ema_slow);

    if closes.len() < min_closes {
        debug!(
            closes = closes.len(),
            required = min_closes,
            "technical analysis: insufficient data"
        );
        return TechnicalResult::unavailable(
            format!(
                "Insufficient data: {} closes, need at least {}",
                closes.len(),
                min_closes
            ),
            closes.len(),
            candles.len(),
        );
    }

    let (ema_fast, ema_medium, ema_slow) = match (
        compute_ema(closes, params.ema_fast),
        compute_ema(closes, params.ema_medium),
        compute_ema(closes, params.ema_slow),
    ) {
        (Some(f), Some(m), Some(s)) => (f, m, s),
        _ => {
            return TechnicalResult::unavailable(
                "EMA could not be computed (non-finite input)",
                closes.len(),
                candles.len(),
            )
        }
    };

    let price = match closes.last() {
        Some(p) if p.is_finite() => *p,
        _ => {
            return TechnicalResult::unavailable(
                "Latest close is not a finite number",
                closes.len(),
                candles.len(),
            )
        }
    };

    let trend = classify_trend(price, ema_fast, ema_medium, ema_slow);
    let directional = compute_directional_index(candles, params.adx_period);

    let result = TechnicalResult {
        available: true,
        reason: None,
        price: Some(round_price(price)),
        ema_fast: Some(round_price(ema_fast)),
        ema_medium: Some(round_price(ema_medium)),
        ema_slow: Some(round_price(ema_slow)),
        trend: Some(trend),
        trend_signal: trend.signal(),
        adx: directional.map(|d| round2(d.adx)),
        di_plus: directional.map(|d| round2(d.di_plus)),
        di_minus: directional.map(|d| round2(d.di_minus)),
        trend_strength: directional.map(|d| classify_strength(d.adx)),
        trend_direction: directional.map(|d| classify_direction(d.di_plus, d.di_minus)),
        closes_used: closes.len(),
        candles_used: candles.len(),
        directional,
    };

    debug!(
        price = format!("{:.2}", price),
        ema_fast = format!("{:.2}", ema_fast),
        ema_medium = format!("{:.2}", ema_medium),
        ema_slow = format!("{:.2}", ema_slow),
        trend = %trend,
        adx = ?result.adx,
        "technical analysis complete"
    );

    result
}
