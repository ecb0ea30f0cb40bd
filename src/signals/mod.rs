// =============================================================================
// Signals Module
// =============================================================================
//
// Shared building blocks of the derivation pipeline:
// - First-match-wins threshold ladders
// - The closed signal-tag vocabulary
// - Output-boundary rounding

pub mod ladder;
pub mod rounding;
pub mod tag;

pub use ladder::{Bound, Ladder, Rung};
pub use rounding::{round2, round_price, round_to};
pub use tag::{Bias, SignalTag};
