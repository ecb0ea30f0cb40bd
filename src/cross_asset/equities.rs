// =============================================================================
// Equity Leadership - index rotation and sector style spreads
// =============================================================================
//
// Rotation spread = NQ%Δ - RTY%Δ
//   > +1.0  NARROW_RALLY  (TECH)     mega-cap tech carrying the tape
//   < -1.0  ROTATION      (VALUE)    money rotating into small caps
//   > +0.3  TECH_LEADING  (TECH)
//   < -0.3  VALUE_LEADING (VALUE)
//   else    BALANCED      (NEUTRAL)
//
// Growth/value spread = XLK%Δ - XLF%Δ
//   > +1.0  GROWTH_DOMINANT
//   < -1.0  VALUE_DOMINANT
//   else    BALANCED

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationSpread {
    /// NQ%Δ - RTY%Δ in percentage points.
    pub value: Option<f64>,
    pub nq_change: f64,
    pub rty_change: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthValue {
    /// XLK%Δ - XLF%Δ in percentage points.
    pub value: Option<f64>,
    pub xlk_change: f64,
    pub xlf_change: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    pub description: String,
}

fn rotation_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(1.0), "NARROW_RALLY", SignalTag::Tech)
        .rung(Bound::Below(-1.0), "ROTATION", SignalTag::Value)
        .rung(Bound::Above(0.3), "TECH_LEADING", SignalTag::Tech)
        .rung(Bound::Below(-0.3), "VALUE_LEADING", SignalTag::Value)
        .otherwise("BALANCED", SignalTag::Neutral)
}

fn growth_value_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(1.0), "GROWTH_DOMINANT", SignalTag::GrowthDominant)
        .rung(Bound::Below(-1.0), "VALUE_DOMINANT", SignalTag::ValueDominant)
        .otherwise("BALANCED", SignalTag::Balanced)
}

/// Nasdaq vs Russell 2000 leadership.
pub fn rotation_spread(snapshot: &PriceSnapshot) -> RotationSpread {
    let nq_change = snapshot.change(symbols::NQ);
    let rty_change = snapshot.change(symbols::RTY);

    let missing = missing_inputs(snapshot, &[symbols::NQ, symbols::RTY], false);
    if !missing.is_empty() {
        return RotationSpread {
            value: None,
            nq_change: round2(nq_change),
            rty_change: round2(rty_change),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            description: missing_description(&missing),
        };
    }

    let spread = nq_change - rty_change;
    let (label, signal) = rotation_ladder()
        .classify(spread)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("BALANCED", SignalTag::Neutral));

    let description = match label {
        "NARROW_RALLY" => format!(
            "Nasdaq outpacing small caps by {:.2} pts; narrow, tech-led tape",
            spread
        ),
        "ROTATION" => format!(
            "Small caps outpacing Nasdaq by {:.2} pts; rotation into value/cyclicals",
            -spread
        ),
        "TECH_LEADING" => format!("Tech modestly leading ({:+.2} pts)", spread),
        "VALUE_LEADING" => format!("Small caps modestly leading ({:+.2} pts)", spread),
        _ => format!("Broad participation, spread {:+.2} pts", spread),
    };

    debug!(
        spread = format!("{:.2}", spread),
        interpretation = label,
        signal = %signal,
        "rotation spread"
    );

    RotationSpread {
        value: Some(round2(spread)),
        nq_change: round2(nq_change),
        rty_change: round2(rty_change),
        interpretation: label.to_string(),
        signal,
        description,
    }
}

/// Technology vs financials sector performance.
pub fn growth_value(snapshot: &PriceSnapshot) -> GrowthValue {
    let xlk_change = snapshot.change(symbols::XLK);
    let xlf_change = snapshot.change(symbols::XLF);

    let missing = missing_inputs(snapshot, &[symbols::XLK, symbols::XLF], false);
    if !missing.is_empty() {
        return GrowthValue {
            value: None,
            xlk_change: round2(xlk_change),
            xlf_change: round2(xlf_change),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            description: missing_description(&missing),
        };
    }

    let spread = xlk_change - xlf_change;
    let (label, signal) = growth_value_ladder()
        .classify(spread)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("BALANCED", SignalTag::Balanced));

    let description = match signal {
        SignalTag::GrowthDominant => "Growth (XLK) dominating financials",
        SignalTag::ValueDominant => "Value (XLF) dominating technology",
        _ => "No clear style preference",
    };

    debug!(spread = format!("{:.2}", spread), signal = %signal, "growth/value spread");

    GrowthValue {
        value: Some(round2(spread)),
        xlk_change: round2(xlk_change),
        xlf_change: round2(xlf_change),
        interpretation: label.to_string(),
        signal,
        description: format!("{} ({:+.2} pts)", description, spread),
    }
}
