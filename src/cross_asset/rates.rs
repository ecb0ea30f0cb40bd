// =============================================================================
// Rates - real yield and the US/Japan carry spread
// =============================================================================
//
// Real yield = TNX - CPI
//   > 2.0  BEARISH_GOLD   (restrictive; opportunity cost of holding gold)
//   > 1.0  CAUTIOUS_GOLD
//   > 0.0  NEUTRAL
//   else   BULLISH_GOLD   (negative real rates)
//
// Carry spread = TNX - JGB10Y
//   > 3.5  YEN_WEAK
//   > 2.5  NEUTRAL
//   < 2.0  YEN_STRENGTH_RISK
//   else   NEUTRAL
// A warning is attached whenever the spread is below 2.5 (carry unwind risk).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

/// Spread below which the carry trade is flagged as at risk.
pub const CARRY_WARNING_SPREAD: f64 = 2.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealYield {
    pub value: Option<f64>,
    pub nominal_yield: f64,
    pub cpi: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarryTrade {
    pub value: Option<f64>,
    pub us_yield: f64,
    pub japan_yield: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub description: String,
}

fn real_yield_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(2.0), "BEARISH_GOLD", SignalTag::BearishGold)
        .rung(Bound::Above(1.0), "CAUTIOUS_GOLD", SignalTag::CautiousGold)
        .rung(Bound::Above(0.0), "NEUTRAL", SignalTag::Neutral)
        .otherwise("BULLISH_GOLD", SignalTag::BullishGold)
}

fn carry_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(3.5), "YEN_WEAK", SignalTag::YenWeak)
        .rung(Bound::Above(2.5), "NEUTRAL", SignalTag::Neutral)
        .rung(Bound::Below(2.0), "YEN_STRENGTH_RISK", SignalTag::YenStrengthRisk)
        .otherwise("NEUTRAL", SignalTag::Neutral)
}

/// 10-year Treasury yield net of inflation.
pub fn real_yield(snapshot: &PriceSnapshot, latest_cpi: f64) -> RealYield {
    let nominal = snapshot.price(symbols::TEN_YEAR);

    let missing = missing_inputs(snapshot, &[symbols::TEN_YEAR], true);
    if !missing.is_empty() || !latest_cpi.is_finite() {
        let description = if missing.is_empty() {
            "Insufficient data: CPI estimate is not a number".to_string()
        } else {
            missing_description(&missing)
        };
        return RealYield {
            value: None,
            nominal_yield: round2(nominal),
            cpi: round2(latest_cpi),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            description,
        };
    }

    let real = nominal - latest_cpi;
    let (label, signal) = real_yield_ladder()
        .classify(real)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NEUTRAL", SignalTag::Neutral));

    let description = match signal {
        SignalTag::BearishGold => "Restrictive real rates; headwind for gold",
        SignalTag::CautiousGold => "Positive real rates; gold upside limited",
        SignalTag::Neutral => "Real rates slightly positive",
        _ => "Negative real rates; supportive for gold",
    };

    debug!(
        real_yield = format!("{:.2}", real),
        nominal = format!("{:.2}", nominal),
        cpi = format!("{:.2}", latest_cpi),
        signal = %signal,
        "real yield"
    );

    RealYield {
        value: Some(round2(real)),
        nominal_yield: round2(nominal),
        cpi: round2(latest_cpi),
        interpretation: label.to_string(),
        signal,
        description: format!("{} ({:+.2}%)", description, real),
    }
}

/// US 10-year minus Japanese 10-year yield.
pub fn carry_trade(snapshot: &PriceSnapshot, japan_yield: f64) -> CarryTrade {
    let us_yield = snapshot.price(symbols::TEN_YEAR);

    let missing = missing_inputs(snapshot, &[symbols::TEN_YEAR], true);
    if !missing.is_empty() || !japan_yield.is_finite() {
        let description = if missing.is_empty() {
            "Insufficient data: Japan yield is not a number".to_string()
        } else {
            missing_description(&missing)
        };
        return CarryTrade {
            value: None,
            us_yield: round2(us_yield),
            japan_yield: round2(japan_yield),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            warning: None,
            description,
        };
    }

    let spread = us_yield - japan_yield;
    let (label, signal) = carry_ladder()
        .classify(spread)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NEUTRAL", SignalTag::Neutral));

    let warning = if spread < CARRY_WARNING_SPREAD {
        warn!(
            spread = format!("{:.2}", spread),
            "US/Japan spread narrowing; carry unwind risk"
        );
        Some(format!(
            "US/Japan spread {:.2}% below {:.1}%: carry trade unwind risk, watch yen strength",
            spread, CARRY_WARNING_SPREAD
        ))
    } else {
        None
    };

    let description = match signal {
        SignalTag::YenWeak => "Wide rate differential; carry trade supported, yen pressured",
        SignalTag::YenStrengthRisk => {
            "Narrow rate differential; yen strength and deleveraging risk"
        }
        _ => "Rate differential in a neutral band",
    };

    CarryTrade {
        value: Some(round2(spread)),
        us_yield: round2(us_yield),
        japan_yield: round2(japan_yield),
        interpretation: label.to_string(),
        signal,
        warning,
        description: format!("{} ({:.2}%)", description, spread),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn tnx(yield_pct: f64) -> PriceSnapshot {
        PriceSnapshot::new().with("^TNX", yield_pct, 0.0)
    }

    #[test]
    fn real_yield_bands() {
        assert_eq!(real_yield(&tnx(5.5), 3.0).signal, SignalTag::BearishGold);
        assert_eq!(real_yield(&tnx(4.5), 3.0).signal, SignalTag::CautiousGold);
        assert_eq!(real_yield(&tnx(3.5), 3.0).signal, SignalTag::Neutral);
        let r = real_yield(&tnx(2.5), 3.0);
        assert_eq!(r.signal, SignalTag::BullishGold);
        assert_eq!(r.value, Some(-0.5));
    }

    #[test]
    fn real_yield_zero_boundary_is_bullish_gold() {
        // 3.0 - 3.0 = 0 is not "> 0"
        assert_eq!(real_yield(&tnx(3.0), 3.0).interpretation, "BULLISH_GOLD");
    }

    #[test]
    fn real_yield_missing_tnx_is_null() {
        let r = real_yield(&PriceSnapshot::new(), 3.0);
        assert!(r.value.is_none());
        assert_eq!(r.signal, SignalTag::NoData);
    }

    #[test]
    fn carry_bands() {
        let wide = carry_trade(&tnx(4.8), 1.0);
        assert_eq!(wide.signal, SignalTag::YenWeak);
        assert!(wide.warning.is_none());

        let mid = carry_trade(&tnx(4.0), 1.0);
        assert_eq!(mid.signal, SignalTag::Neutral);
        assert!(mid.warning.is_none());

        let narrow = carry_trade(&tnx(2.8), 1.0);
        assert_eq!(narrow.signal, SignalTag::YenStrengthRisk);
        assert!(narrow.warning.is_some());
    }

    #[test]
    fn carry_gap_band_is_neutral_with_warning() {
        // 2.0 <= spread <= 2.5 falls through to the final NEUTRAL rung.
        let r = carry_trade(&tnx(3.2), 1.0);
        assert_eq!(r.value, Some(2.2));
        assert_eq!(r.interpretation, "NEUTRAL");
        assert_eq!(r.signal, SignalTag::Neutral);
        assert!(r.warning.is_some());
    }

    #[test]
    fn carry_uses_configured_japan_yield() {
        let r = carry_trade(&tnx(4.25), 1.75);
        assert_eq!(r.value, Some(2.5));
        assert_eq!(r.japan_yield, 1.75);
        // exactly 2.5 is neither "> 2.5" nor "< 2.0"
        assert_eq!(r.interpretation, "NEUTRAL");
        assert!(r.warning.is_none());
    }
}
