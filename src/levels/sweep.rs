// =============================================================================
// Sweep classification - one bar against a set of key levels
// =============================================================================
//
// For each applicable level L the bar is checked against four patterns:
//
//   BULLISH_SWEEP   low < L,  close > L, open > L   stops under L taken, reclaimed
//   BEARISH_SWEEP   high > L, close < L, open < L   stops over L taken, rejected
//   FAILED_SUPPORT  low < L,  close < L, open > L   support lost
//   BREAKOUT        high > L, close > L, open < L   resistance cleared
//
// The open and close sides differ between the pairs, so at most one pattern
// fires per (bar, level).  A bar may still produce events for several levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::market_data::{level_price, SweepBar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SweepType {
    BullishSweep,
    BearishSweep,
    FailedSupport,
    Breakout,
    /// Injected by the host rather than detected.
    Manual,
}

impl SweepType {
    /// True for the two patterns that trade through a level and close back.
    pub fn is_reclaim(&self) -> bool {
        matches!(self, SweepType::BullishSweep | SweepType::BearishSweep)
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepType::BullishSweep => write!(f, "BULLISH_SWEEP"),
            SweepType::BearishSweep => write!(f, "BEARISH_SWEEP"),
            SweepType::FailedSupport => write!(f, "FAILED_SUPPORT"),
            SweepType::Breakout => write!(f, "BREAKOUT"),
            SweepType::Manual => write!(f, "MANUAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepEvent {
    pub id: Uuid,
    pub symbol: String,
    pub level_name: String,
    pub level_price: f64,
    pub sweep_type: SweepType,
    /// Extreme of the bar on the far side of the level.
    pub sweep_price: f64,
    pub close_price: f64,
    pub reclaimed: bool,
    pub timestamp: DateTime<Utc>,
    pub interpretation: String,
    pub action: String,
}

impl SweepEvent {
    /// An externally supplied event, e.g. marked by hand on a chart.
    pub fn manual(
        symbol: impl Into<String>,
        level_name: impl Into<String>,
        level_price: f64,
        sweep_price: f64,
        close_price: f64,
        reclaimed: bool,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let level_name = level_name.into();
        let (interpretation, action) = describe(SweepType::Manual, &level_name);
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            interpretation,
            action,
            level_name,
            level_price,
            sweep_type: SweepType::Manual,
            sweep_price,
            close_price,
            reclaimed,
            timestamp,
        }
    }
}

/// Which pattern, if any, the bar forms against `level`.
pub fn classify_level(bar: &SweepBar, level: f64) -> Option<SweepType> {
    if bar.low < level && bar.close > level && bar.open > level {
        Some(SweepType::BullishSweep)
    } else if bar.high > level && bar.close < level && bar.open < level {
        Some(SweepType::BearishSweep)
    } else if bar.low < level && bar.close < level && bar.open > level {
        Some(SweepType::FailedSupport)
    } else if bar.high > level && bar.close > level && bar.open < level {
        Some(SweepType::Breakout)
    } else {
        None
    }
}

fn describe(sweep_type: SweepType, level_name: &str) -> (String, String) {
    match sweep_type {
        SweepType::BullishSweep => (
            format!("Swept liquidity below {} and reclaimed; trapped shorts", level_name),
            format!("Look for longs above {}", level_name),
        ),
        SweepType::BearishSweep => (
            format!("Swept liquidity above {} and rejected; trapped longs", level_name),
            format!("Look for shorts below {}", level_name),
        ),
        SweepType::FailedSupport => (
            format!("{} failed as support; closed below", level_name),
            format!("Bearish below {}; wait for a retest from underneath", level_name),
        ),
        SweepType::Breakout => (
            format!("Broke out through {} and held", level_name),
            format!("Bullish above {}; wait for a retest from above", level_name),
        ),
        SweepType::Manual => (
            format!("Manually recorded sweep of {}", level_name),
            "Review level manually".to_string(),
        ),
    }
}

/// Run every applicable level of `bar` through [`classify_level`].
///
/// Does not touch any history; see `SweepHistory::detect_sweep` for the
/// recording variant.
pub fn classify_bar(bar: &SweepBar, now: DateTime<Utc>) -> Vec<SweepEvent> {
    bar.levels
        .iter()
        .filter_map(|(name, entry)| {
            let level = level_price(*entry)?;
            let sweep_type = classify_level(bar, level)?;
            let sweep_price = match sweep_type {
                SweepType::BullishSweep | SweepType::FailedSupport => bar.low,
                _ => bar.high,
            };
            let (interpretation, action) = describe(sweep_type, name);

            Some(SweepEvent {
                id: Uuid::new_v4(),
                symbol: bar.symbol.clone(),
                level_name: name.clone(),
                level_price: level,
                sweep_type,
                sweep_price,
                close_price: bar.close,
                reclaimed: sweep_type.is_reclaim(),
                timestamp: now,
                interpretation,
                action,
            })
        })
        .collect()
}
