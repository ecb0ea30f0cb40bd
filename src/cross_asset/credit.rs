// =============================================================================
// Credit - HYG risk appetite and HYG vs TLT spread
// =============================================================================
//
// HYG%Δ   > +0.3  RISK_ON
//         < -0.3  RISK_OFF
//         else    NEUTRAL
//
// Credit spread = HYG%Δ - TLT%Δ
//   > +0.5  high yield outperforming Treasuries
//   < -0.5  flight to quality

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HygSignal {
    /// HYG session change in percent.
    pub value: Option<f64>,
    pub hyg_change: f64,
    pub tlt_change: f64,
    /// HYG%Δ - TLT%Δ; `None` without a TLT observation.
    pub credit_spread: Option<f64>,
    pub interpretation: String,
    pub signal: SignalTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_note: Option<String>,
    pub description: String,
}

fn hyg_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(0.3), "RISK_ON", SignalTag::RiskOn)
        .rung(Bound::Below(-0.3), "RISK_OFF", SignalTag::RiskOff)
        .otherwise("NEUTRAL", SignalTag::Neutral)
}

/// Credit-market read from high-yield and long-duration Treasury ETFs.
pub fn hyg_signal(snapshot: &PriceSnapshot) -> HygSignal {
    let hyg_change = snapshot.change(symbols::HYG);
    let tlt_change = snapshot.change(symbols::TLT);

    let missing = missing_inputs(snapshot, &[symbols::HYG], false);
    if !missing.is_empty() {
        return HygSignal {
            value: None,
            hyg_change: round2(hyg_change),
            tlt_change: round2(tlt_change),
            credit_spread: None,
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            credit_note: None,
            description: missing_description(&missing),
        };
    }

    let (label, signal) = hyg_ladder()
        .classify(hyg_change)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NEUTRAL", SignalTag::Neutral));

    let credit_spread = missing_inputs(snapshot, &[symbols::TLT], false)
        .is_empty()
        .then(|| hyg_change - tlt_change);

    let credit_note = credit_spread.and_then(|spread| {
        if spread > 0.5 {
            Some(format!(
                "High yield outperforming Treasuries by {:.2} pts; credit risk appetite healthy",
                spread
            ))
        } else if spread < -0.5 {
            Some(format!(
                "Treasuries outperforming high yield by {:.2} pts; flight to quality",
                -spread
            ))
        } else {
            None
        }
    });

    let description = match signal {
        SignalTag::RiskOn => "Junk bonds bid; credit markets confirming risk appetite",
        SignalTag::RiskOff => "Junk bonds offered; credit stress building",
        _ => "Credit markets quiet",
    };

    debug!(
        hyg_change = format!("{:.2}", hyg_change),
        credit_spread = ?credit_spread.map(round2),
        signal = %signal,
        "HYG signal"
    );

    HygSignal {
        value: Some(round2(hyg_change)),
        hyg_change: round2(hyg_change),
        tlt_change: round2(tlt_change),
        credit_spread: credit_spread.map(round2),
        interpretation: label.to_string(),
        signal,
        credit_note,
        description: description.to_string(),
    }
}
