// =============================================================================
// Technical Analysis Engine
// =============================================================================
//
// Turns a historical close/candle series into EMA levels, directional index
// values and qualitative trend/strength labels, and scores how "in play" an
// instrument is.  Series come from a `HistoricalSeriesProvider`; the engine
// itself never fetches anything.

pub mod trend;
pub mod trending;

pub use trend::{
    analyze_series, analyze_series_with, classify_direction, classify_strength, classify_trend,
    TechnicalResult, TrendDirection, TrendLabel, TrendStrength,
};
pub use trending::{detect_trending, trending_from_technical, TrendingLevel, TrendingScore};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::TechnicalParams;
use crate::market_data::{normalize_symbol, HistoricalSeriesProvider};

/// Technical result tagged with the symbol and analysis time.
#[derive(Debug, Clone, Serialize)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: TechnicalResult,
}

/// Fetch the series for `symbol` from `provider` and analyse it.
///
/// Provider failures arrive as empty series and surface as
/// `available: false`.
pub fn analyze_symbol<P>(provider: &P, symbol: &str, params: &TechnicalParams) -> TechnicalSnapshot
where
    P: HistoricalSeriesProvider + ?Sized,
{
    let closes = provider.closes(symbol);
    let candles = provider.candles(symbol);

    debug!(
        symbol,
        closes = closes.len(),
        candles = candles.len(),
        "analysing historical series"
    );

    TechnicalSnapshot {
        symbol: normalize_symbol(symbol),
        analyzed_at: Utc::now(),
        result: analyze_series_with(params, &closes, &candles),
    }
}
