// =============================================================================
// Market Data Module
// =============================================================================
//
// Input schemas at the core boundary.  Vendor payloads are validated and
// coerced into these types by the host application; the engines never look at
// raw JSON.

pub mod candle;
pub mod provider;
pub mod snapshot;

pub use candle::{level_price, Candle, LevelSet, SweepBar};
pub use provider::{HistoricalSeriesProvider, LevelBarProvider, PriceSnapshotProvider};
pub use snapshot::{normalize_symbol, PriceObservation, PriceSnapshot};
