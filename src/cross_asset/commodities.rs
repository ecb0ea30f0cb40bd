// =============================================================================
// Commodity Ratios - gold/silver and the RBOB crack spread
// =============================================================================
//
// Gold/silver ratio = GC / SI  (fear gauge: gold outperforms in stress)
//   > 85  EXTREME_FEAR     (RISK_OFF)
//   > 75  FEAR             (RISK_OFF)
//   > 65  NEUTRAL          (NEUTRAL)
//   > 55  RISK_ON          (RISK_ON)
//   else  EXTREME_RISK_ON  (RISK_ON)
//
// Crack spread = RB * 42 - CL  (gasoline $/gal -> $/bbl, minus crude)
//   > 35  WIDE        (BULLISH_RB)
//   > 25  NORMAL      (NEUTRAL)
//   > 15  TIGHT       (CAUTIOUS)
//   else  COMPRESSED  (BEARISH)
//
// Both need real prices; a zero price yields `value: None`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::market_data::PriceSnapshot;
use crate::signals::{round2, round_price, Bound, Ladder, SignalTag};

use super::{missing_description, missing_inputs, symbols, NO_DATA};

/// Gallons per barrel.
pub const GALLONS_PER_BARREL: f64 = 42.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldSilverRatio {
    pub value: Option<f64>,
    pub gold_price: f64,
    pub silver_price: f64,
    pub interpretation: String,
    pub signal: SignalTag,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrackSpread {
    /// Refining margin in $/bbl.
    pub value: Option<f64>,
    pub rb_price: f64,
    pub cl_price: f64,
    /// RBOB converted to $/bbl.
    pub rb_per_barrel: Option<f64>,
    pub interpretation: String,
    pub signal: SignalTag,
    pub description: String,
}

fn gold_silver_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(85.0), "EXTREME_FEAR", SignalTag::RiskOff)
        .rung(Bound::Above(75.0), "FEAR", SignalTag::RiskOff)
        .rung(Bound::Above(65.0), "NEUTRAL", SignalTag::Neutral)
        .rung(Bound::Above(55.0), "RISK_ON", SignalTag::RiskOn)
        .otherwise("EXTREME_RISK_ON", SignalTag::RiskOn)
}

fn crack_ladder() -> Ladder<SignalTag> {
    Ladder::new()
        .rung(Bound::Above(35.0), "WIDE", SignalTag::BullishRb)
        .rung(Bound::Above(25.0), "NORMAL", SignalTag::Neutral)
        .rung(Bound::Above(15.0), "TIGHT", SignalTag::Cautious)
        .otherwise("COMPRESSED", SignalTag::Bearish)
}

/// Gold priced in ounces of silver.
pub fn gold_silver_ratio(snapshot: &PriceSnapshot) -> GoldSilverRatio {
    let gold = snapshot.price(symbols::GOLD);
    let silver = snapshot.price(symbols::SILVER);

    let missing = missing_inputs(snapshot, &[symbols::GOLD, symbols::SILVER], true);
    if !missing.is_empty() {
        return GoldSilverRatio {
            value: None,
            gold_price: round_price(gold),
            silver_price: round_price(silver),
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            description: missing_description(&missing),
        };
    }

    let ratio = gold / silver;
    let (label, signal) = gold_silver_ladder()
        .classify(ratio)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NEUTRAL", SignalTag::Neutral));

    let description = match label {
        "EXTREME_FEAR" => "Gold massively outperforming silver; defensive positioning",
        "FEAR" => "Gold favoured over silver; risk appetite fading",
        "NEUTRAL" => "Ratio near its long-run range",
        "RISK_ON" => "Silver outperforming; industrial/risk demand",
        _ => "Silver surging relative to gold; speculative risk appetite",
    };

    debug!(
        ratio = format!("{:.2}", ratio),
        interpretation = label,
        "gold/silver ratio"
    );

    GoldSilverRatio {
        value: Some(round2(ratio)),
        gold_price: round_price(gold),
        silver_price: round_price(silver),
        interpretation: label.to_string(),
        signal,
        description: format!("{} (ratio {:.2})", description, ratio),
    }
}

/// RBOB gasoline vs WTI crude refining margin.
pub fn crack_spread(snapshot: &PriceSnapshot) -> CrackSpread {
    let rb = snapshot.price(symbols::RBOB);
    let cl = snapshot.price(symbols::CRUDE);

    let missing = missing_inputs(snapshot, &[symbols::RBOB, symbols::CRUDE], true);
    if !missing.is_empty() {
        return CrackSpread {
            value: None,
            rb_price: round_price(rb),
            cl_price: round_price(cl),
            rb_per_barrel: None,
            interpretation: NO_DATA.to_string(),
            signal: SignalTag::NoData,
            description: missing_description(&missing),
        };
    }

    let rb_per_barrel = rb * GALLONS_PER_BARREL;
    let spread = rb_per_barrel - cl;
    let (label, signal) = crack_ladder()
        .classify(spread)
        .map(|r| (r.label, r.signal))
        .unwrap_or(("NORMAL", SignalTag::Neutral));

    let description = match signal {
        SignalTag::BullishRb => "Refining margins wide; gasoline demand strong relative to crude",
        SignalTag::Neutral => "Refining margins in a normal range",
        SignalTag::Cautious => "Refining margins tight; watch gasoline demand",
        _ => "Refining margins compressed; gasoline weak relative to crude",
    };

    debug!(
        spread = format!("{:.2}", spread),
        interpretation = label,
        "crack spread"
    );

    CrackSpread {
        value: Some(round2(spread)),
        rb_price: round_price(rb),
        cl_price: round_price(cl),
        rb_per_barrel: Some(round2(rb_per_barrel)),
        interpretation: label.to_string(),
        signal,
        description: format!("{} (${:.2}/bbl)", description, spread),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn metals(gold: f64, silver: f64) -> PriceSnapshot {
        PriceSnapshot::new()
            .with("GC", gold, 0.0)
            .with("SI", silver, 0.0)
    }

    #[test]
    fn gold_silver_extreme_fear() {
        let r = gold_silver_ratio(&metals(2700.0, 30.0));
        assert_eq!(r.value, Some(90.0));
        assert_eq!(r.signal, SignalTag::RiskOff);
        assert!(r.interpretation.contains("EXTREME_FEAR"));
    }

    #[test]
    fn gold_silver_bands() {
        assert_eq!(gold_silver_ratio(&metals(2400.0, 30.0)).interpretation, "FEAR"); // 80
        assert_eq!(gold_silver_ratio(&metals(2100.0, 30.0)).interpretation, "NEUTRAL"); // 70
        assert_eq!(gold_silver_ratio(&metals(1800.0, 30.0)).interpretation, "RISK_ON"); // 60
        let r = gold_silver_ratio(&metals(1500.0, 30.0)); // 50
        assert_eq!(r.interpretation, "EXTREME_RISK_ON");
        assert_eq!(r.signal, SignalTag::RiskOn);
    }

    #[test]
    fn gold_silver_boundary_belongs_to_lower_band() {
        // exactly 85 is not "> 85"
        assert_eq!(gold_silver_ratio(&metals(2550.0, 30.0)).interpretation, "FEAR");
    }

    #[test]
    fn gold_silver_zero_price_is_null() {
        let r = gold_silver_ratio(&metals(2700.0, 0.0));
        assert!(r.value.is_none());
        assert_eq!(r.interpretation, NO_DATA);
        let r = gold_silver_ratio(&PriceSnapshot::new().with("GC=F", 2700.0, 0.0));
        assert!(r.value.is_none());
    }

    #[test]
    fn gold_silver_reads_aliases() {
        let snap = PriceSnapshot::new()
            .with("GC=F", 2700.0, 0.0)
            .with("SI=F", 30.0, 0.0);
        assert_eq!(gold_silver_ratio(&snap).value, Some(90.0));
    }

    #[test]
    fn crack_spread_tight() {
        let snap = PriceSnapshot::new()
            .with("RB", 2.10, 0.0)
            .with("CL", 70.0, 0.0);
        let r = crack_spread(&snap);
        assert_eq!(r.value, Some(18.2));
        assert_eq!(r.interpretation, "TIGHT");
        assert_eq!(r.signal, SignalTag::Cautious);
        assert_eq!(r.rb_price, 2.1);
        assert_eq!(r.rb_per_barrel, Some(88.2));
    }

    #[test]
    fn crack_spread_bands() {
        let crack = |rb: f64, cl: f64| {
            crack_spread(&PriceSnapshot::new().with("RB", rb, 0.0).with("CL", cl, 0.0))
        };
        assert_eq!(crack(2.60, 70.0).signal, SignalTag::BullishRb); // 39.2
        assert_eq!(crack(2.30, 70.0).interpretation, "NORMAL"); // 26.6
        assert_eq!(crack(1.90, 70.0).signal, SignalTag::Bearish); // 9.8
    }

    #[test]
    fn crack_spread_missing_crude_is_null() {
        let r = crack_spread(&PriceSnapshot::new().with("RB", 2.1, 0.0));
        assert!(r.value.is_none());
        assert!(r.rb_per_barrel.is_none());
        assert!(r.description.contains("CL"));
    }
}
