// =============================================================================
// BTC vs NQ - same-direction / divergence heuristic
// =============================================================================
//
// Not a statistical correlation.  Two numbers are compared:
//   same_direction = BTC%Δ and NQ%Δ share a sign
//   divergence     = |BTC%Δ - NQ%Δ|
//
//   same  and divergence < 1.0  NORMAL      BTC trading as a risk asset
//   same  and divergence > 2.0  HIGH_BETA   BTC amplifying the equity move
//   !same and divergence > 1.5  DIVERGENCE  decoupled
//   else                        NEUTRAL

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BtcNqCorrelation {
    /// |BTC%Δ - NQ%Δ| in percentage points.
    pub value: Option<f64>,
    pub btc_change: f64,
    pub nq_change: f64,
    pub same_direction: bool,
    pub interpretation: String,
    pub signal: SignalTag,
    pub description: String,
}

fn same_direction_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Below(1.0), "NORMAL", SignalTag::Normal)
        .rung(Bound::Above(2.0), "HIGH_BETA", SignalTag::HighBeta)
        .otherwise("NEUTRAL", SignalTag::Neutral)
}

fn opposite_direction_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(1.5), "DIVERGENCE", SignalTag::Divergence)
        .otherwise("NEUTRAL", SignalTag::Neutral)
}

/// Zero counts as the positive side so a flat print pairs with an up move.
fn same_sign(a: f64, b: f64) -> bool {
    (a >= 0.0) == (b >= 0.0)
}

/// Compare bitcoin's session move against the Nasdaq's.
pub fn btc_nq_correlation(snapshot: &PriceSnapshot) -> BtcNqCorrelation {
    let btc_change = snapshot.change(symbols::BTC);
    let nq_change = snapshot.change(symbols::NQ);
    let same_direction = same_sign(btc_change, nq_change);

    let missing = missing_inputs(snapshot, &[symbols::BTC, symbols::NQ], false);
    if !missing.is_empty() {
        return BtcNqCorrelation {
            value: None,
            btc_change: round2(btc_change),
            nq_change: round2(nq_change),
            same_direction,
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            description: missing_description(&missing),
        };
    }

    let divergence = (btc_change - nq_change).abs();
    let ladder = if same_direction {
        same_direction_ladder()
    } else {
        opposite_direction_ladder()
    };
    let (label, signal) = ladder
        .classify(divergence)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NEUTRAL", SignalTag::Neutral));

    let description = match signal {
        SignalTag::Normal => "BTC tracking equities as a risk asset",
        SignalTag::HighBeta => "BTC amplifying the equity move (high beta)",
        SignalTag::Divergence => "BTC decoupled from equities; watch for catch-up",
        _ => "No clear relationship this session",
    };

    debug!(
        btc = format!("{:+.2}", btc_change),
        nq = format!("{:+.2}", nq_change),
        divergence = format!("{:.2}", divergence),
        signal = %signal,
        "BTC/NQ relationship"
    );

    BtcNqCorrelation {
        value: Some(round2(divergence)),
        btc_change: round2(btc_change),
        nq_change: round2(nq_change),
        same_direction,
        interpretation: label.to_string(),
        signal,
        description: description.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn pair(btc: f64, nq: f64) -> BtcNqCorrelation {
        btc_nq_correlation(
            &PriceSnapshot::new()
                .with("BTC-USD", 95000.0, btc)
                .with("NQ=F", 21000.0, nq),
        )
    }

    #[test]
    fn same_direction_bands() {
        let r = pair(1.2, 0.8);
        assert!(r.same_direction);
        assert_eq!(r.signal, SignalTag::Normal);

        assert_eq!(pair(3.5, 1.0).signal, SignalTag::HighBeta);
        // 1.0 <= divergence <= 2.0 with same direction
        assert_eq!(pair(2.5, 1.0).signal, SignalTag::Neutral);
    }

    #[test]
    fn opposite_direction_bands() {
        let r = pair(-1.2, 0.8);
        assert!(!r.same_direction);
        assert_eq!(r.value, Some(2.0));
        assert_eq!(r.signal, SignalTag::Divergence);

        assert_eq!(pair(-0.5, 0.5).signal, SignalTag::Neutral);
    }

    #[test]
    fn missing_btc_is_null() {
        let r = btc_nq_correlation(&PriceSnapshot::new().with("NQ", 21000.0, 0.5));
        assert!(r.value.is_none());
        assert_eq!(r.signal, SignalTag::NoData);
    }
}
