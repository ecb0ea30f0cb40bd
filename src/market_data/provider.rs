// =============================================================================
// Collaborator interfaces
// =============================================================================
//
// The derivation core never performs I/O.  The host application implements
// these traits on top of whatever vendor clients, caches and fallbacks it
// runs, and must degrade to an empty/default-shaped answer instead of failing.

use super::candle::{Candle, SweepBar};
use super::snapshot::PriceSnapshot;

/// Supplies the current price/change snapshot.
pub trait PriceSnapshotProvider {
    fn snapshot(&self) -> PriceSnapshot;
}

/// Supplies historical series for a symbol, oldest first.
///
/// A failed fetch is reported as an empty vector.
pub trait HistoricalSeriesProvider {
    fn closes(&self, symbol: &str) -> Vec<f64>;

    fn candles(&self, symbol: &str) -> Vec<Candle>;
}

/// Supplies the live bar and level map used for sweep detection.
pub trait LevelBarProvider {
    fn current_bar(&self, symbol: &str) -> Option<SweepBar>;
}

impl PriceSnapshotProvider for PriceSnapshot {
    fn snapshot(&self) -> PriceSnapshot {
        self.clone()
    }
}
