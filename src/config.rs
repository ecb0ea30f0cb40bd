// =============================================================================
// Engine Configuration - tunables for every derivation engine
// =============================================================================
//
// All parameters the engines recognise live here.  The host application may
// keep the struct in a JSON file next to its own settings; every field carries
// `#[serde(default)]` so that adding new fields never breaks loading an older
// file, and `{}` yields the documented defaults.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_latest_cpi() -> f64 {
    3.0
}

fn default_japan_yield() -> f64 {
    1.0
}

fn default_ema_fast() -> usize {
    9
}

fn default_ema_medium() -> usize {
    21
}

fn default_ema_slow() -> usize {
    50
}

fn default_adx_period() -> usize {
    14
}

fn default_min_closes() -> usize {
    50
}

fn default_sweep_capacity() -> usize {
    100
}

fn default_lookback_minutes() -> i64 {
    60
}

fn default_summary_window() -> usize {
    50
}

fn default_recent_limit() -> usize {
    20
}

fn default_nearest_count() -> usize {
    5
}

// =============================================================================
// MacroInputs
// =============================================================================

/// Caller-supplied macro figures the snapshot does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroInputs {
    /// Latest year-over-year CPI estimate in percent (real-yield metric).
    #[serde(default = "default_latest_cpi")]
    pub latest_cpi: f64,

    /// Japanese 10-year government bond yield in percent (carry metric).
    #[serde(default = "default_japan_yield")]
    pub japan_yield: f64,
}

impl Default for MacroInputs {
    fn default() -> Self {
        Self {
            latest_cpi: default_latest_cpi(),
            japan_yield: default_japan_yield(),
        }
    }
}

// =============================================================================
// TechnicalParams
// =============================================================================

/// Look-back periods for the technical analysis engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalParams {
    #[serde(default = "default_ema_fast")]
    pub ema_fast: usize,

    #[serde(default = "default_ema_medium")]
    pub ema_medium: usize,

    #[serde(default = "default_ema_slow")]
    pub ema_slow: usize,

    /// Directional index period; needs `adx_period + 1` candles.
    #[serde(default = "default_adx_period")]
    pub adx_period: usize,

    /// Closes required before any analysis is attempted.
    #[serde(default = "default_min_closes")]
    pub min_closes: usize,
}

impl Default for TechnicalParams {
    fn default() -> Self {
        Self {
            ema_fast: default_ema_fast(),
            ema_medium: default_ema_medium(),
            ema_slow: default_ema_slow(),
            adx_period: default_adx_period(),
            min_closes: default_min_closes(),
        }
    }
}

// =============================================================================
// SweepParams / LevelParams
// =============================================================================

/// Sizing of the sweep history store and its default query windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepParams {
    /// Maximum retained events; the oldest are evicted beyond this.
    #[serde(default = "default_sweep_capacity")]
    pub capacity: usize,

    /// Default window for "was this level swept recently".
    #[serde(default = "default_lookback_minutes")]
    pub lookback_minutes: i64,

    /// Number of most recent events a summary is computed over.
    #[serde(default = "default_summary_window")]
    pub summary_window: usize,

    /// Default page size for recent-sweep listings.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            capacity: default_sweep_capacity(),
            lookback_minutes: default_lookback_minutes(),
            summary_window: default_summary_window(),
            recent_limit: default_recent_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Levels kept per side in nearest-level queries.
    #[serde(default = "default_nearest_count")]
    pub nearest_count: usize,
}

impl Default for LevelParams {
    fn default() -> Self {
        Self {
            nearest_count: default_nearest_count(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Top-level configuration for the derivation core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub macro_inputs: MacroInputs,

    #[serde(default)]
    pub technical: TechnicalParams,

    #[serde(default)]
    pub sweeps: SweepParams,

    #[serde(default)]
    pub levels: LevelParams,
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults with
    /// a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read engine config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse engine config from {}", path.display()))?;

        info!(
            path = %path.display(),
            latest_cpi = config.macro_inputs.latest_cpi,
            japan_yield = config.macro_inputs.japan_yield,
            sweep_capacity = config.sweeps.capacity,
            "engine config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise engine config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "engine config saved (atomic)");
        Ok(())
    }
}
