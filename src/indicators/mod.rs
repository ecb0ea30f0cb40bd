// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free indicator math.  Functions return `Option<T>` (or a
// documented neutral value) so callers are forced to handle insufficient-data
// and numerical-edge-case scenarios.

pub mod adx;
pub mod ema;

pub use adx::{compute_directional_index, wilder_smooth, DirectionalIndex};
pub use ema::{calculate_ema, compute_ema};
