// =============================================================================
// Cross-Asset Metrics Engine
// =============================================================================
//
// Ratios and spreads between related instruments, each mapped through its own
// threshold ladder to an interpretation code and a signal tag:
//
//   equities    - NQ vs RTY rotation, XLK vs XLF growth/value
//   commodities - gold/silver ratio, RBOB crack spread
//   rates       - real yield (TNX - CPI), US/Japan carry spread
//   credit      - HYG risk appetite and HYG vs TLT credit spread
//   volatility  - VIX regime and spike alert
//   crypto      - BTC vs NQ same-direction / divergence heuristic
//   dollar      - DXY move and the instruments it leans on
//   risk_tone   - composite risk-on / risk-off vote
//
// Every calculator is a pure function of the snapshot (plus macro inputs for
// the two rate metrics).  Nothing is cached; identical inputs give identical
// outputs.

pub mod commodities;
pub mod credit;
pub mod crypto;
pub mod dollar;
pub mod equities;
pub mod rates;
pub mod risk_tone;
pub mod volatility;

pub use commodities::{crack_spread, gold_silver_ratio, CrackSpread, GoldSilverRatio};
pub use credit::{hyg_signal, HygSignal};
pub use crypto::{btc_nq_correlation, BtcNqCorrelation};
pub use dollar::{dollar_impact, AffectedInstrument, DollarImpact};
pub use equities::{growth_value, rotation_spread, GrowthValue, RotationSpread};
pub use rates::{carry_trade, real_yield, CarryTrade, RealYield};
pub use risk_tone::{assess_risk_tone, RiskConfidence, RiskTone, Tone};
pub use volatility::{vix_interpretation, VixReading};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::MacroInputs;
use crate::market_data::PriceSnapshot;

/// Canonical instrument keys read by the calculators.
pub mod symbols {
    pub const NQ: &str = "NQ";
    pub const RTY: &str = "RTY";
    pub const XLK: &str = "XLK";
    pub const XLF: &str = "XLF";
    pub const GOLD: &str = "GC";
    pub const SILVER: &str = "SI";
    pub const HYG: &str = "HYG";
    pub const TLT: &str = "TLT";
    pub const RBOB: &str = "RB";
    pub const CRUDE: &str = "CL";
    pub const TEN_YEAR: &str = "TNX";
    pub const VIX: &str = "VIX";
    pub const DXY: &str = "DXY";
    pub const BTC: &str = "BTC";
}

/// Interpretation code used when a required input is missing.
pub const NO_DATA: &str = "NO_DATA";

/// Symbols from `required` that cannot feed a calculation.
///
/// Price-based metrics (`need_price`) reject zero prices, the data source's
/// "absent" sentinel.  Change-based metrics only need the symbol present.
pub(crate) fn missing_inputs<'a>(
    snapshot: &PriceSnapshot,
    required: &[&'a str],
    need_price: bool,
) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|sym| match snapshot.get(sym) {
            Some(obs) if need_price => !obs.has_price(),
            Some(obs) => !obs.change_percent.is_finite(),
            None => true,
        })
        .collect()
}

/// Standard description for a metric that could not be computed.
pub(crate) fn missing_description(missing: &[&str]) -> String {
    format!("Insufficient data: missing {}", missing.join(", "))
}

// =============================================================================
// Aggregate report
// =============================================================================

/// Every cross-asset metric for one snapshot, plus the composite risk tone.
#[derive(Debug, Clone, Serialize)]
pub struct CrossAssetReport {
    pub generated_at: DateTime<Utc>,
    pub rotation: RotationSpread,
    pub growth_value: GrowthValue,
    pub gold_silver: GoldSilverRatio,
    pub hyg: HygSignal,
    pub crack_spread: CrackSpread,
    pub real_yield: RealYield,
    pub carry_trade: CarryTrade,
    pub btc_nq: BtcNqCorrelation,
    pub vix: VixReading,
    pub dollar: DollarImpact,
    pub risk_tone: RiskTone,
}

/// Run every calculator against `snapshot`.
pub fn cross_asset_report(
    snapshot: &PriceSnapshot,
    macro_inputs: &MacroInputs,
) -> CrossAssetReport {
    let report = CrossAssetReport {
        generated_at: Utc::now(),
        rotation: rotation_spread(snapshot),
        growth_value: growth_value(snapshot),
        gold_silver: gold_silver_ratio(snapshot),
        hyg: hyg_signal(snapshot),
        crack_spread: crack_spread(snapshot),
        real_yield: real_yield(snapshot, macro_inputs.latest_cpi),
        carry_trade: carry_trade(snapshot, macro_inputs.japan_yield),
        btc_nq: btc_nq_correlation(snapshot),
        vix: vix_interpretation(snapshot),
        dollar: dollar_impact(snapshot),
        risk_tone: assess_risk_tone(snapshot),
    };

    debug!(
        symbols = snapshot.len(),
        risk_tone = %report.risk_tone.tone,
        rotation = %report.rotation.signal,
        vix = %report.vix.signal,
        "cross-asset report built"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalTag;

    fn full_snapshot() -> PriceSnapshot {
        PriceSnapshot::new()
            .with("NQ=F", 21000.0, 1.5)
            .with("RTY=F", 2300.0, 0.2)
            .with("XLK", 230.0, 1.2)
            .with("XLF", 45.0, -0.1)
            .with("GC=F", 2700.0, 0.3)
            .with("SI=F", 30.0, -0.4)
            .with("HYG", 79.0, 0.1)
            .with("TLT", 92.0, 0.2)
            .with("RB=F", 2.10, 0.5)
            .with("CL=F", 70.0, 0.8)
            .with("^TNX", 4.25, 0.6)
            .with("^VIX", 16.5, -2.0)
            .with("DX-Y.NYB", 104.0, 0.1)
            .with("BTC-USD", 95000.0, 2.1)
    }

    #[test]
    fn report_covers_every_metric() {
        let report = cross_asset_report(&full_snapshot(), &MacroInputs::default());
        assert_eq!(report.rotation.signal, SignalTag::Tech);
        assert_eq!(report.gold_silver.signal, SignalTag::RiskOff);
        assert_eq!(report.crack_spread.interpretation, "TIGHT");
        assert_eq!(report.real_yield.value, Some(1.25));
        assert_eq!(report.carry_trade.value, Some(3.25));
        assert_eq!(report.vix.interpretation, "NORMAL");
        assert_eq!(report.dollar.signal, SignalTag::Stable);
        assert!(report.btc_nq.same_direction);
    }

    #[test]
    fn empty_snapshot_never_panics() {
        let report = cross_asset_report(&PriceSnapshot::new(), &MacroInputs::default());
        assert!(report.rotation.value.is_none());
        assert!(report.gold_silver.value.is_none());
        assert!(report.crack_spread.value.is_none());
        assert!(report.real_yield.value.is_none());
        assert!(report.vix.value.is_none());
        assert_eq!(report.vix.signal, SignalTag::NoData);
    }

    #[test]
    fn missing_inputs_respects_price_sentinel() {
        let snap = PriceSnapshot::new().with("GC", 0.0, 0.5).with("SI", 30.0, 0.1);
        assert_eq!(
            missing_inputs(&snap, &[symbols::GOLD, symbols::SILVER], true),
            vec!["GC"]
        );
        assert!(missing_inputs(&snap, &[symbols::GOLD, symbols::SILVER], false).is_empty());
        assert_eq!(missing_inputs(&snap, &[symbols::TLT], false), vec!["TLT"]);
    }

    #[test]
    fn report_serialises() {
        let report = cross_asset_report(&full_snapshot(), &MacroInputs::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["gold_silver"]["signal"], "RISK_OFF");
        assert!(json["risk_tone"]["tone"].is_string());
    }
}
