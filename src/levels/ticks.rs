// =============================================================================
// Tick math - contract tick size / tick value table
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::market_data::normalize_symbol;

/// Minimum price increment and its dollar value for one contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSpec {
    pub tick_size: f64,
    pub tick_value: f64,
}

impl TickSpec {
    const fn new(tick_size: f64, tick_value: f64) -> Self {
        Self { tick_size, tick_value }
    }
}

/// Used for any symbol missing from the table.
pub const DEFAULT_TICK_SPEC: TickSpec = TickSpec::new(0.01, 10.0);

const TICK_TABLE: &[(&str, TickSpec)] = &[
    // Equity index
    ("ES", TickSpec::new(0.25, 12.50)),
    ("MES", TickSpec::new(0.25, 1.25)),
    ("NQ", TickSpec::new(0.25, 5.00)),
    ("MNQ", TickSpec::new(0.25, 0.50)),
    ("YM", TickSpec::new(1.0, 5.00)),
    ("RTY", TickSpec::new(0.10, 5.00)),
    // Metals
    ("GC", TickSpec::new(0.10, 10.00)),
    ("MGC", TickSpec::new(0.10, 1.00)),
    ("SI", TickSpec::new(0.005, 25.00)),
    ("HG", TickSpec::new(0.0005, 12.50)),
    // Energy
    ("CL", TickSpec::new(0.01, 10.00)),
    ("MCL", TickSpec::new(0.01, 1.00)),
    ("NG", TickSpec::new(0.001, 10.00)),
    ("RB", TickSpec::new(0.0001, 4.20)),
    ("HO", TickSpec::new(0.0001, 4.20)),
    // Treasuries
    ("ZB", TickSpec::new(0.03125, 31.25)),
    ("ZN", TickSpec::new(0.015625, 15.625)),
    ("ZF", TickSpec::new(0.0078125, 7.8125)),
    // FX
    ("6E", TickSpec::new(0.00005, 6.25)),
    ("6J", TickSpec::new(0.0000005, 6.25)),
    ("6B", TickSpec::new(0.0001, 6.25)),
    // Crypto
    ("BTC", TickSpec::new(5.0, 25.00)),
    ("MBT", TickSpec::new(5.0, 0.50)),
    ("ETH", TickSpec::new(0.50, 25.00)),
    // Grains
    ("ZC", TickSpec::new(0.25, 12.50)),
    ("ZS", TickSpec::new(0.25, 12.50)),
    ("ZW", TickSpec::new(0.25, 12.50)),
];

/// Tick size and value for `symbol`; unknown symbols get [`DEFAULT_TICK_SPEC`].
pub fn tick_spec(symbol: &str) -> TickSpec {
    let key = normalize_symbol(symbol);
    match TICK_TABLE.iter().find(|(sym, _)| *sym == key) {
        Some((_, spec)) => *spec,
        None => {
            trace!(symbol, "no tick table entry, using default");
            DEFAULT_TICK_SPEC
        }
    }
}

/// Signed number of ticks from `from` to `to` (positive when `to` is higher).
pub fn compute_tick_distance(symbol: &str, from: f64, to: f64) -> i64 {
    let spec = tick_spec(symbol);
    let ticks = ((to - from) / spec.tick_size).round();
    if ticks.is_finite() {
        ticks as i64
    } else {
        0
    }
}

/// Dollar value of `ticks` for one contract; always non-negative.
pub fn compute_dollar_value(symbol: &str, ticks: i64) -> f64 {
    ticks.unsigned_abs() as f64 * tick_spec(symbol).tick_value
}
