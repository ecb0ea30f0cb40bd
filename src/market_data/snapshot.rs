// =============================================================================
// Price Snapshot - immutable per-refresh view of the market
// =============================================================================
//
// The upstream data provider publishes one observation per instrument and
// refresh cycle.  Instruments arrive under several spellings depending on the
// vendor ("GC" vs "GC=F", "^VIX" vs "VIX", "DX-Y.NYB" vs "DXY"), so every key
// is normalised to one canonical symbol on the way in *and* on lookup.
//
// Absent symbols read as price = 0 / change = 0.  Zero is the agreed sentinel
// for "no data" and the metric engines turn it into `value: None`.
// =============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// One instrument's last price and session percentage change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
    #[serde(default)]
    pub price: f64,
    #[serde(default, alias = "changePercent")]
    pub change_percent: f64,
}

impl PriceObservation {
    pub fn new(price: f64, change_percent: f64) -> Self {
        Self {
            price,
            change_percent,
        }
    }

    /// A usable observation carries a finite, non-zero price.
    pub fn has_price(&self) -> bool {
        self.price.is_finite() && self.price != 0.0
    }
}

/// Map any accepted vendor alias to the canonical key used internally.
///
/// ```text
/// "gc=f" -> "GC"      "^VIX"    -> "VIX"    "DX-Y.NYB" -> "DXY"
/// "^TNX" -> "TNX"     "BTC-USD" -> "BTC"    "US10Y"    -> "TNX"
/// ```
pub fn normalize_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    let stripped = upper.trim_start_matches('^');
    let stripped = stripped.strip_suffix("=F").unwrap_or(stripped);

    match stripped {
        "DX-Y.NYB" | "DX" | "USDX" => "DXY".to_string(),
        "BTC-USD" | "BTCUSD" | "BTCUSDT" | "XBT" => "BTC".to_string(),
        "US10Y" | "TNX" => "TNX".to_string(),
        other => other.to_string(),
    }
}

/// Whether `symbol` is already spelled the canonical way.
fn is_canonical(symbol: &str) -> bool {
    normalize_symbol(symbol) == symbol
}

/// Canonicalised snapshot of the market for one refresh cycle.
///
/// Serialises as a plain `symbol -> observation` map; deserialising folds
/// vendor aliases exactly like [`PriceSnapshot::from_observations`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    from = "HashMap<String, PriceObservation>",
    into = "HashMap<String, PriceObservation>"
)]
pub struct PriceSnapshot {
    observations: HashMap<String, PriceObservation>,
}

impl From<HashMap<String, PriceObservation>> for PriceSnapshot {
    fn from(raw: HashMap<String, PriceObservation>) -> Self {
        Self::from_observations(raw)
    }
}

impl From<PriceSnapshot> for HashMap<String, PriceObservation> {
    fn from(snapshot: PriceSnapshot) -> Self {
        snapshot.observations
    }
}

impl PriceSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a raw vendor map, folding aliases together.
    ///
    /// The result does not depend on iteration order as long as at most one
    /// alias spelling per instrument carries a price.
    pub fn from_observations<I, K>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, PriceObservation)>,
        K: AsRef<str>,
    {
        let mut snapshot = Self::new();
        for (symbol, observation) in raw {
            snapshot.insert(symbol.as_ref(), observation);
        }
        snapshot
    }

    /// Insert an observation under its canonical key.
    ///
    /// A priced observation is never replaced by an unpriced one.  Between
    /// two of the same kind the canonical spelling wins, so `"GC"` beats
    /// `"GC=F"` whichever arrives first.
    pub fn insert(&mut self, symbol: &str, observation: PriceObservation) {
        let key = normalize_symbol(symbol);
        let canonical = is_canonical(symbol.trim());

        let replace = match self.observations.get(&key) {
            None => true,
            Some(existing) => match (existing.has_price(), observation.has_price()) {
                (false, true) => true,
                (true, false) => false,
                _ => canonical,
            },
        };

        if replace {
            self.observations.insert(key, observation);
        } else {
            trace!(symbol, key = %key, "observation ignored, better entry present");
        }
    }

    /// Builder-style insert, handy for assembling snapshots in code.
    pub fn with(mut self, symbol: &str, price: f64, change_percent: f64) -> Self {
        self.insert(symbol, PriceObservation::new(price, change_percent));
        self
    }

    pub fn get(&self, symbol: &str) -> Option<&PriceObservation> {
        self.observations.get(&normalize_symbol(symbol))
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    /// Last price, or the 0.0 sentinel when the symbol is absent.
    pub fn price(&self, symbol: &str) -> f64 {
        self.get(symbol).map(|o| o.price).unwrap_or(0.0)
    }

    /// Session change in percent, or 0.0 when the symbol is absent.
    pub fn change(&self, symbol: &str) -> f64 {
        self.get(symbol).map(|o| o.change_percent).unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.observations.keys().map(String::as_str)
    }
}
