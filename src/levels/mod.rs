// =============================================================================
// Level & Sweep Engine
// =============================================================================
//
//   ticks    - per-contract tick size / value table and tick math
//   ranking  - distance, priority and daily-range filter of named levels
//   sweep    - four-pattern classification of a bar against its levels
//   history  - bounded newest-first store of detected sweeps

pub mod history;
pub mod ranking;
pub mod sweep;
pub mod ticks;

pub use history::{SweepHistory, SweepSummary};
pub use ranking::{
    level_priority, nearest_levels, rank_levels, LevelDirection, NearestLevels, RankedLevel,
};
pub use sweep::{classify_bar, classify_level, SweepEvent, SweepType};
pub use ticks::{
    compute_dollar_value, compute_tick_distance, tick_spec, TickSpec, DEFAULT_TICK_SPEC,
};
