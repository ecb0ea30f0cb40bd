use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLC bar, ordered oldest-first wherever a slice is expected.
///
/// The directional index only reads high/low/close, so `open` may be omitted
/// on the wire; it then mirrors `close`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Bar range (high - low).
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[derive(Deserialize)]
struct RawCandle {
    #[serde(default)]
    open: Option<f64>,
    high: f64,
    low: f64,
    close: f64,
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawCandle::deserialize(deserializer)?;
        Ok(Self {
            open: raw.open.unwrap_or(raw.close),
            high: raw.high,
            low: raw.low,
            close: raw.close,
        })
    }
}

/// Named reference prices ("PDH", "VWAP", ...) for one detection call.
///
/// `None` means the level does not apply today.  Ordering carries no meaning;
/// a `BTreeMap` just keeps iteration deterministic.
pub type LevelSet = BTreeMap<String, Option<f64>>;

/// Resolve a level entry to a usable price.  Zero and non-finite prices are
/// treated the same as `None`.
pub fn level_price(entry: Option<f64>) -> Option<f64> {
    entry.filter(|p| p.is_finite() && *p != 0.0)
}

/// The current bar of one instrument together with its key levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepBar {
    pub symbol: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub levels: LevelSet,
}

impl SweepBar {
    pub fn new(symbol: impl Into<String>, bar: Candle, levels: LevelSet) -> Self {
        Self {
            symbol: symbol.into(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            levels,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candle_without_open_mirrors_close() {
        let c: Candle = serde_json::from_str(r#"{"high":2.0,"low":1.0,"close":1.5}"#).unwrap();
        assert!((c.open - 1.5).abs() < 1e-10);
        assert!((c.range() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn zero_and_null_levels_are_not_applicable() {
        assert_eq!(level_price(None), None);
        assert_eq!(level_price(Some(0.0)), None);
        assert_eq!(level_price(Some(f64::NAN)), None);
        assert_eq!(level_price(Some(101.25)), Some(101.25));
    }

    #[test]
    fn sweep_bar_levels_accept_nulls() {
        let bar: SweepBar = serde_json::from_str(
            r#"{"symbol":"ES","open":1,"high":2,"low":0.5,"close":1.5,
                "levels":{"PDH":2.5,"ONH":null}}"#,
        )
        .unwrap();
        assert_eq!(bar.levels.len(), 2);
        assert_eq!(bar.levels["ONH"], None);
    }
}
