// =============================================================================
// Dollar Impact - what a DXY move leans on
// =============================================================================
//
// DXY%Δ > +0.3  STRENGTH  (dollar-priced assets pressured)
//       < -0.3  WEAKNESS  (dollar-priced assets supported)
//       else    STABLE
//
// On STRENGTH / WEAKNESS the result lists the instruments most exposed to the
// dollar with the directional bias the move implies for each.  Dollar-priced
// assets lean against the DXY; dollar-base pairs (USDJPY) lean with it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, round_price, Bias, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

/// Instrument exposed to the dollar, with the reason it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedInstrument {
    pub symbol: String,
    pub bias: Bias,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DollarImpact {
    /// DXY session change in percent.
    pub value: Option<f64>,
    pub dxy_price: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    pub affected: Vec<AffectedInstrument>,
    pub description: String,
}

/// (symbol, why it is exposed, moves with the dollar)
const DOLLAR_SENSITIVE: &[(&str, &str, bool)] = &[
    ("GC", "gold is priced in dollars", false),
    ("SI", "silver is priced in dollars", false),
    ("HG", "copper demand is priced in dollars", false),
    ("CL", "crude is priced in dollars", false),
    ("6E", "euro futures quote EUR/USD", false),
    ("6B", "pound futures quote GBP/USD", false),
    ("6J", "yen futures quote JPY/USD", false),
    ("USDJPY", "dollar is the base currency of USD/JPY", true),
    ("BTC", "bitcoin trades as a dollar-liquidity asset", false),
    ("ES", "multinational earnings translate back into dollars", false),
];

fn dollar_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(0.3), "STRENGTH", SignalTag::Strength)
        .rung(Bound::Below(-0.3), "WEAKNESS", SignalTag::Weakness)
        .otherwise("STABLE", SignalTag::Stable)
}

fn affected_instruments(dollar_up: bool) -> Vec<AffectedInstrument> {
    DOLLAR_SENSITIVE
        .iter()
        .map(|&(symbol, reason, with_dollar)| AffectedInstrument {
            symbol: symbol.to_string(),
            bias: if with_dollar == dollar_up {
                Bias::Bullish
            } else {
                Bias::Bearish
            },
            reason: reason.to_string(),
        })
        .collect()
}

/// Classify the session move in the dollar index.
pub fn dollar_impact(snapshot: &PriceSnapshot) -> DollarImpact {
    let dxy_price = snapshot.price(symbols::DXY);
    let change = snapshot.change(symbols::DXY);

    let missing = missing_inputs(snapshot, &[symbols::DXY], false);
    if !missing.is_empty() {
        return DollarImpact {
            value: None,
            dxy_price: round_price(dxy_price),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            affected: Vec::new(),
            description: missing_description(&missing),
        };
    }

    let (label, signal) = dollar_ladder()
        .classify(change)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("STABLE", SignalTag::Stable));

    let (affected, description) = match signal {
        SignalTag::Strength => (
            affected_instruments(true),
            format!("Dollar strengthening ({:+.2}%); headwind for dollar-priced assets", change),
        ),
        SignalTag::Weakness => (
            affected_instruments(false),
            format!("Dollar weakening ({:+.2}%); tailwind for dollar-priced assets", change),
        ),
        _ => (
            Vec::new(),
            format!("Dollar stable ({:+.2}%)", change),
        ),
    };

    debug!(
        dxy_change = format!("{:+.2}", change),
        signal = %signal,
        affected = affected.len(),
        "dollar impact"
    );

    DollarImpact {
        value: Some(round2(change)),
        dxy_price: round_price(dxy_price),
        interpretation: label.to_string(),
        signal,
        affected,
        description,
    }
}
