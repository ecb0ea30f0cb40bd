// =============================================================================
// Trending Score - how "in play" is an instrument right now?
// =============================================================================
//
// Additive score over four independent factors:
//
//   |change%| >= 2.0 => +3   >= 1.0 => +2   >= 0.5 => +1
//   ADX       >= 30  => +3   >= 25  => +2
//   |EMA trend signal| >= 2                 => +2
//   fundamental catalyst present            => +2
//
// Level: Hot (>= 7) and Active (>= 5) count as trending; Moderate (>= 3);
// otherwise Normal.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::signals::{Bound, Ladder};

use super::trend::TechnicalResult;

/// Heat bucket of the trending score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendingLevel {
    Hot,
    Active,
    Moderate,
    Normal,
}

impl TrendingLevel {
    pub fn is_trending(self) -> bool {
        matches!(self, Self::Hot | Self::Active)
    }
}

impl std::fmt::Display for TrendingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hot => write!(f, "Hot"),
            Self::Active => write!(f, "Active"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Normal => write!(f, "Normal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingScore {
    pub score: u32,
    pub level: TrendingLevel,
    pub is_trending: bool,
    /// Human-readable list of the factors that added points.
    pub factors: Vec<String>,
}

fn move_ladder() -> Ladder<u32> {
    Ladder::new()
        .rung(Bound::AtLeast(2.0), "large move", 3)
        .rung(Bound::AtLeast(1.0), "solid move", 2)
        .rung(Bound::AtLeast(0.5), "modest move", 1)
        .otherwise("quiet", 0)
}

fn adx_ladder() -> Ladder<u32> {
    Ladder::new()
        .rung(Bound::AtLeast(30.0), "strong trend", 3)
        .rung(Bound::AtLeast(25.0), "trend forming", 2)
        .otherwise("no trend", 0)
}

fn level_ladder() -> Ladder<TrendingLevel> {
    Ladder::new()
        .rung(Bound::AtLeast(7.0), "Hot", TrendingLevel::Hot)
        .rung(Bound::AtLeast(5.0), "Active", TrendingLevel::Active)
        .rung(Bound::AtLeast(3.0), "Moderate", TrendingLevel::Moderate)
        .otherwise("Normal", TrendingLevel::Normal)
}

/// Score an instrument's trending-ness.
///
/// `adx` is optional because the directional index may be unavailable on a
/// short candle history; a missing value contributes nothing.
pub fn detect_trending(
    change_percent: f64,
    adx: Option<f64>,
    ema_signal: f64,
    has_catalyst: bool,
) -> TrendingScore {
    let mut score = 0;
    let mut factors = Vec::new();

    if change_percent.is_finite() {
        if let Some(rung) = move_ladder().classify(change_percent.abs()) {
            if rung.signal > 0 {
                score += rung.signal;
                factors.push(format!("{} ({:+.2}%)", rung.label, change_percent));
            }
        }
    }

    if let Some(adx) = adx.filter(|a| a.is_finite()) {
        if let Some(rung) = adx_ladder().classify(adx) {
            if rung.signal > 0 {
                score += rung.signal;
                factors.push(format!("{} (ADX {:.1})", rung.label, adx));
            }
        }
    }

    if ema_signal.abs() >= 2.0 {
        score += 2;
        factors.push("full EMA stack alignment".to_string());
    }

    if has_catalyst {
        score += 2;
        factors.push("fundamental catalyst".to_string());
    }

    let level = level_ladder()
        .classify(score as f64)
        .map(|r| r.signal)
        .unwrap_or(TrendingLevel::Normal);

    trace!(score, level = %level, "trending score");

    TrendingScore {
        score,
        level,
        is_trending: level.is_trending(),
        factors,
    }
}

/// Trending score fed from a technical result.
///
/// Scores the unrounded directional index; the rounded `adx` field is only a
/// fallback for results rebuilt from their serialized form.
pub fn trending_from_technical(
    technical: &TechnicalResult,
    change_percent: f64,
    has_catalyst: bool,
) -> TrendingScore {
    detect_trending(
        change_percent,
        technical.directional.map(|d| d.adx).or(technical.adx),
        technical.trend_signal,
        has_catalyst,
    )
}
