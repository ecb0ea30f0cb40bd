// =============================================================================
// SignalEngine - host-facing hub
// =============================================================================
//
// Owns the configuration and the one piece of mutable state (the sweep
// history) and runs each engine against the host's collaborator
// implementations.  Cheap to share: wrap in `Arc<SignalEngine>` or clone the
// `Arc<SweepHistory>` out of it.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::EngineConfig;
use crate::cross_asset::{cross_asset_report, CrossAssetReport};
use crate::levels::{nearest_levels, NearestLevels, SweepEvent, SweepHistory};
use crate::market_data::{
    HistoricalSeriesProvider, LevelBarProvider, LevelSet, PriceSnapshotProvider,
};
use crate::technical::{analyze_symbol, TechnicalSnapshot};

pub struct SignalEngine {
    config: EngineConfig,
    sweeps: Arc<SweepHistory>,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        let sweeps = Arc::new(SweepHistory::with_params(config.sweeps));
        Self { config, sweeps }
    }

    /// Build from a JSON config file (see [`EngineConfig::load`]).
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = EngineConfig::load(path)?;
        info!(
            sweep_capacity = config.sweeps.capacity,
            adx_period = config.technical.adx_period,
            "signal engine configured"
        );
        Ok(Self::new(config))
    }

    /// Share an existing history, e.g. between several engines in one process.
    pub fn with_history(config: EngineConfig, sweeps: Arc<SweepHistory>) -> Self {
        Self { config, sweeps }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sweeps(&self) -> &Arc<SweepHistory> {
        &self.sweeps
    }

    /// Every cross-asset metric plus the risk tone for the provider's snapshot.
    pub fn cross_asset<P>(&self, provider: &P) -> CrossAssetReport
    where
        P: PriceSnapshotProvider + ?Sized,
    {
        cross_asset_report(&provider.snapshot(), &self.config.macro_inputs)
    }

    pub fn technical<P>(&self, provider: &P, symbol: &str) -> TechnicalSnapshot
    where
        P: HistoricalSeriesProvider + ?Sized,
    {
        analyze_symbol(provider, symbol, &self.config.technical)
    }

    /// Nearest levels using the configured per-side count.
    pub fn nearest_levels(
        &self,
        symbol: &str,
        current_price: f64,
        levels: &LevelSet,
    ) -> NearestLevels {
        nearest_levels(symbol, current_price, levels, self.config.levels.nearest_count)
    }

    /// Detect and record sweeps on the provider's current bar for `symbol`.
    pub fn scan_sweeps<P>(&self, provider: &P, symbol: &str) -> Vec<SweepEvent>
    where
        P: LevelBarProvider + ?Sized,
    {
        self.sweeps.detect_from(provider, symbol)
    }
}
