// =============================================================================
// Level ranking - tick distance and priority of named reference prices
// =============================================================================
//
// Every applicable level in a `LevelSet` is measured against the current
// price in ticks of the instrument, valued in dollars per contract, and given
// a fixed priority by the kind of level it is:
//
//   5  monthly
//   4  weekly, pivots
//   3  prior day high/low/close, initial balance
//   2  session IB, value area (VAH/VAL), point of control
//   1  VWAP
//   0  anything else
//
// Levels further than half a daily range outside PDH/PDL are marked as out of
// range and dropped from nearest-level queries.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use crate::market_data::{level_price, LevelSet};

use super::ticks::{compute_dollar_value, compute_tick_distance};

/// Where a level sits relative to the current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelDirection {
    Above,
    Below,
    At,
}

impl fmt::Display for LevelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelDirection::Above => write!(f, "above"),
            LevelDirection::Below => write!(f, "below"),
            LevelDirection::At => write!(f, "at"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLevel {
    pub name: String,
    pub price: f64,
    /// Signed ticks from the current price to the level.
    pub ticks: i64,
    /// `|ticks|`.
    pub distance_ticks: u64,
    pub direction: LevelDirection,
    /// Dollar value of `distance_ticks` for one contract.
    pub dollar_value: f64,
    pub priority: u8,
    pub in_daily_range: bool,
}

/// Levels on each side of the current price, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestLevels {
    pub symbol: String,
    pub current_price: f64,
    pub above: Vec<RankedLevel>,
    pub below: Vec<RankedLevel>,
    /// Levels sitting exactly on the current price (zero ticks away).
    pub at: Vec<RankedLevel>,
    /// Closest in-range level on either side; ties go to the higher priority.
    pub nearest: Option<RankedLevel>,
}

/// Fixed weight of a level by its name.
pub fn level_priority(name: &str) -> u8 {
    let n = name.trim().to_ascii_uppercase();

    if n.contains("MONTH") {
        5
    } else if n.contains("WEEK") || n.contains("PIVOT") {
        4
    } else if n.starts_with("SESSION") || n.starts_with("ON_") {
        2
    } else if matches!(n.as_str(), "PDH" | "PDL" | "PDC" | "IB" | "IBH" | "IBL") {
        3
    } else if n.contains("VAH") || n.contains("VAL") || n.contains("POC") {
        2
    } else if n.contains("VWAP") {
        1
    } else {
        0
    }
}

/// `(low, high)` bounds of PDL - 0.5 x range .. PDH + 0.5 x range, when both
/// prior-day extremes are present.
fn daily_bounds(levels: &LevelSet) -> Option<(f64, f64)> {
    let pdh = levels.get("PDH").copied().and_then(level_price)?;
    let pdl = levels.get("PDL").copied().and_then(level_price)?;
    let half_range = (pdh - pdl).abs() * 0.5;
    Some((pdh.min(pdl) - half_range, pdh.max(pdl) + half_range))
}

/// Measure every applicable level against `current_price`.
///
/// Sorted ascending by signed tick distance: deepest level below the price
/// first, highest level above it last.
pub fn rank_levels(symbol: &str, current_price: f64, levels: &LevelSet) -> Vec<RankedLevel> {
    let bounds = daily_bounds(levels);

    let mut ranked: Vec<RankedLevel> = levels
        .iter()
        .filter_map(|(name, entry)| {
            let price = level_price(*entry)?;
            let ticks = compute_tick_distance(symbol, current_price, price);
            let direction = match ticks.cmp(&0) {
                Ordering::Greater => LevelDirection::Above,
                Ordering::Less => LevelDirection::Below,
                Ordering::Equal => LevelDirection::At,
            };
            let in_daily_range = bounds.map_or(true, |(lo, hi)| price >= lo && price <= hi);

            Some(RankedLevel {
                name: name.clone(),
                price,
                ticks,
                distance_ticks: ticks.unsigned_abs(),
                direction,
                dollar_value: compute_dollar_value(symbol, ticks),
                priority: level_priority(name),
                in_daily_range,
            })
        })
        .collect();

    ranked.sort_by_key(|l| l.ticks);
    ranked
}

fn nearest_first(a: &RankedLevel, b: &RankedLevel) -> Ordering {
    a.distance_ticks
        .cmp(&b.distance_ticks)
        .then_with(|| b.priority.cmp(&a.priority))
}

/// In-range levels split by side, each side nearest first and cut to `count`.
pub fn nearest_levels(
    symbol: &str,
    current_price: f64,
    levels: &LevelSet,
    count: usize,
) -> NearestLevels {
    let mut above = Vec::new();
    let mut below = Vec::new();
    let mut at = Vec::new();

    for level in rank_levels(symbol, current_price, levels)
        .into_iter()
        .filter(|l| l.in_daily_range)
    {
        match level.direction {
            LevelDirection::Above => above.push(level),
            LevelDirection::Below => below.push(level),
            LevelDirection::At => at.push(level),
        }
    }

    above.sort_by(nearest_first);
    below.sort_by(nearest_first);
    at.sort_by(nearest_first);
    above.truncate(count);
    below.truncate(count);
    at.truncate(count);

    let nearest = at
        .iter()
        .chain(above.iter())
        .chain(below.iter())
        .min_by(|a, b| nearest_first(a, b))
        .cloned();

    debug!(
        symbol,
        price = current_price,
        above = above.len(),
        below = below.len(),
        nearest = ?nearest.as_ref().map(|l| l.name.as_str()),
        "nearest levels"
    );

    NearestLevels {
        symbol: symbol.to_string(),
        current_price,
        above,
        below,
        at,
        nearest,
    }
}
