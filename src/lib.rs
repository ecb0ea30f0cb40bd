// =============================================================================
// Market Signal Core - library root
// =============================================================================
//
// Derives interpreted trading signals from raw market observations:
//
//   technical   - EMA stack and directional index over historical series
//   cross_asset - ratios and spreads between related instruments, risk tone
//   levels      - tick distance to key levels and liquidity-sweep detection
//
// Every computation is a pure function of its inputs except the sweep
// history, which is an owned store the host constructs and shares.  Data
// fetching lives behind the traits in `market_data::provider`.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
pub mod config;
pub mod cross_asset;
pub mod engine;
pub mod indicators;
pub mod levels;
pub mod logging;
pub mod market_data;
pub mod signals;
pub mod technical;

pub use config::EngineConfig;
pub use engine::SignalEngine;
