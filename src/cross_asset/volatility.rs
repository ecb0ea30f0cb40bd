// =============================================================================
// Volatility - VIX regime and spike alert
// =============================================================================
//
//   VIX < 12  EXTREME_LOW  (CAUTION)       complacency
//       < 15  LOW          (RISK_ON)
//       < 20  NORMAL       (NEUTRAL)
//       < 25  ELEVATED     (CAUTIOUS)
//       < 30  HIGH         (FEAR)
//       else  PANIC        (EXTREME_FEAR)
//
// A spike alert is attached when the VIX moves more than 10% in either
// direction during the session.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

/// Session move (in percent) beyond which a spike alert is raised.
pub const VIX_SPIKE_PCT: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VixReading {
    /// VIX level.
    pub value: Option<f64>,
    pub change_percent: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spike_alert: Option<String>,
    pub description: String,
}

fn vix_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Below(12.0), "EXTREME_LOW", SignalTag::Caution)
        .rung(Bound::Below(15.0), "LOW", SignalTag::RiskOn)
        .rung(Bound::Below(20.0), "NORMAL", SignalTag::Neutral)
        .rung(Bound::Below(25.0), "ELEVATED", SignalTag::Cautious)
        .rung(Bound::Below(30.0), "HIGH", SignalTag::Fear)
        .otherwise("PANIC", SignalTag::ExtremeFear)
}

/// Classify the current VIX level.
pub fn vix_interpretation(snapshot: &PriceSnapshot) -> VixReading {
    let level = snapshot.price(symbols::VIX);
    let change = snapshot.change(symbols::VIX);

    let missing = missing_inputs(snapshot, &[symbols::VIX], true);
    if !missing.is_empty() {
        return VixReading {
            value: None,
            change_percent: round2(change),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            spike_alert: None,
            description: missing_description(&missing),
        };
    }

    let (label, signal) = vix_ladder()
        .classify(level)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NORMAL", SignalTag::Neutral));

    let spike_alert = if change > VIX_SPIKE_PCT {
        warn!(vix = level, change = format!("{:+.2}", change), "VIX spike");
        Some(format!(
            "VIX spiking {:+.2}%: volatility expanding, expect wider ranges",
            change
        ))
    } else if change < -VIX_SPIKE_PCT {
        Some(format!(
            "VIX collapsing {:+.2}%: volatility crush, fear unwinding",
            change
        ))
    } else {
        None
    };

    let description = match label {
        "EXTREME_LOW" => "Extreme complacency; reversal risk elevated",
        "LOW" => "Low volatility; supportive of risk assets",
        "NORMAL" => "Volatility in a normal range",
        "ELEVATED" => "Volatility elevated; reduce size",
        "HIGH" => "High fear; expect large intraday swings",
        _ => "Panic-level volatility",
    };

    debug!(vix = format!("{:.2}", level), interpretation = label, "VIX interpretation");

    VixReading {
        value: Some(round2(level)),
        change_percent: round2(change),
        interpretation: label.to_string(),
        signal,
        spike_alert,
        description: description.to_string(),
    }
}
