// =============================================================================
// Risk Tone - composite risk-on / risk-off vote
// =============================================================================
//
// Four independent checks against the same snapshot, each voting at most once:
//
//   VIX       < 18 on     > 25 off     (VIX 0 = absent, no vote)
//   HYG%Δ     > 0.2 on    < -0.2 off
//   DXY%Δ     < -0.2 on   > 0.3 off
//   Breadth   RTY%Δ > NQ%Δ and RTY%Δ > 0.3  on
//
// Tally:
//   on >= 3 and off == 0  RISK_ON        HIGH
//   off >= 3 and on == 0  RISK_OFF       HIGH
//   on > off              LEAN_RISK_ON   MODERATE
//   off > on              LEAN_RISK_OFF  MODERATE
//   equal                 MIXED          LOW

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::market_data::PriceSnapshot;

use super::symbols;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tone {
    RiskOn,
    RiskOff,
    LeanRiskOn,
    LeanRiskOff,
    Mixed,
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tone::RiskOn => write!(f, "RISK_ON"),
            Tone::RiskOff => write!(f, "RISK_OFF"),
            Tone::LeanRiskOn => write!(f, "LEAN_RISK_ON"),
            Tone::LeanRiskOff => write!(f, "LEAN_RISK_OFF"),
            Tone::Mixed => write!(f, "MIXED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskConfidence {
    High,
    Moderate,
    Low,
}

impl fmt::Display for RiskConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskConfidence::High => write!(f, "HIGH"),
            RiskConfidence::Moderate => write!(f, "MODERATE"),
            RiskConfidence::Low => write!(f, "LOW"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTone {
    pub tone: Tone,
    pub confidence: RiskConfidence,
    pub risk_on_signals: u32,
    pub risk_off_signals: u32,
    /// One line per check that voted.
    pub factors: Vec<String>,
}

#[derive(Default)]
struct Tally {
    on: u32,
    off: u32,
    factors: Vec<String>,
}

impl Tally {
    fn risk_on(&mut self, factor: String) {
        self.on += 1;
        self.factors.push(factor);
    }

    fn risk_off(&mut self, factor: String) {
        self.off += 1;
        self.factors.push(factor);
    }
}

fn classify_tally(on: u32, off: u32) -> (Tone, RiskConfidence) {
    if on >= 3 && off == 0 {
        (Tone::RiskOn, RiskConfidence::High)
    } else if off >= 3 && on == 0 {
        (Tone::RiskOff, RiskConfidence::High)
    } else if on > off {
        (Tone::LeanRiskOn, RiskConfidence::Moderate)
    } else if off > on {
        (Tone::LeanRiskOff, RiskConfidence::Moderate)
    } else {
        (Tone::Mixed, RiskConfidence::Low)
    }
}

/// Combine the VIX, credit, dollar and breadth checks into one tone.
///
/// Absent symbols contribute no vote; an empty snapshot is MIXED / LOW.
pub fn assess_risk_tone(snapshot: &PriceSnapshot) -> RiskTone {
    let mut tally = Tally::default();

    // ── VIX ──
    let vix = snapshot.price(symbols::VIX);
    if vix > 0.0 {
        if vix < 18.0 {
            tally.risk_on(format!("VIX low ({:.2})", vix));
        } else if vix > 25.0 {
            tally.risk_off(format!("VIX elevated ({:.2})", vix));
        }
    }

    // ── Credit ──
    if snapshot.contains(symbols::HYG) {
        let hyg = snapshot.change(symbols::HYG);
        if hyg > 0.2 {
            tally.risk_on(format!("HYG bid ({:+.2}%)", hyg));
        } else if hyg < -0.2 {
            tally.risk_off(format!("HYG offered ({:+.2}%)", hyg));
        }
    }

    // ── Dollar ──
    if snapshot.contains(symbols::DXY) {
        let dxy = snapshot.change(symbols::DXY);
        if dxy < -0.2 {
            tally.risk_on(format!("Dollar weak ({:+.2}%)", dxy));
        } else if dxy > 0.3 {
            tally.risk_off(format!("Dollar strong ({:+.2}%)", dxy));
        }
    }

    // ── Breadth ──
    if snapshot.contains(symbols::RTY) {
        let rty = snapshot.change(symbols::RTY);
        let nq = snapshot.change(symbols::NQ);
        if rty > nq && rty > 0.3 {
            tally.risk_on(format!(
                "Small caps leading (RTY {:+.2}% vs NQ {:+.2}%)",
                rty, nq
            ));
        }
    }

    let (tone, confidence) = classify_tally(tally.on, tally.off);

    debug!(
        on = tally.on,
        off = tally.off,
        tone = %tone,
        confidence = %confidence,
        "risk tone"
    );

    RiskTone {
        tone,
        confidence,
        risk_on_signals: tally.on,
        risk_off_signals: tally.off,
        factors: tally.factors,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_risk_on_votes() {
        let snap = PriceSnapshot::new()
            .with("VIX", 15.0, 0.0)
            .with("HYG", 79.0, 0.3)
            .with("DXY", 104.0, -0.3)
            .with("RTY", 2300.0, 0.5)
            .with("NQ", 21000.0, 0.1);
        let r = assess_risk_tone(&snap);
        assert_eq!(r.risk_on_signals, 4);
        assert_eq!(r.risk_off_signals, 0);
        assert_eq!(r.tone, Tone::RiskOn);
        assert_eq!(r.confidence, RiskConfidence::High);
        assert_eq!(r.factors.len(), 4);
    }

    #[test]
    fn three_risk_off_votes() {
        let snap = PriceSnapshot::new()
            .with("VIX", 28.0, 15.0)
            .with("HYG", 78.0, -0.5)
            .with("DXY", 105.0, 0.5);
        let r = assess_risk_tone(&snap);
        assert_eq!(r.tone, Tone::RiskOff);
        assert_eq!(r.confidence, RiskConfidence::High);
    }

    #[test]
    fn lean_when_votes_disagree() {
        let snap = PriceSnapshot::new()
            .with("VIX", 15.0, 0.0)
            .with("HYG", 79.0, 0.3)
            .with("DXY", 104.0, -0.3)
            .with("RTY", 2300.0, 0.1)
            .with("NQ", 21000.0, 0.5);
        // three on, none off, but flip the dollar to off
        let mut r = assess_risk_tone(&snap);
        assert_eq!(r.tone, Tone::RiskOn);

        let snap = snap.with("DXY", 104.0, 0.4);
        r = assess_risk_tone(&snap);
        assert_eq!((r.risk_on_signals, r.risk_off_signals), (2, 1));
        assert_eq!(r.tone, Tone::LeanRiskOn);
        assert_eq!(r.confidence, RiskConfidence::Moderate);
    }

    #[test]
    fn empty_snapshot_is_mixed() {
        let r = assess_risk_tone(&PriceSnapshot::new());
        assert_eq!(r.tone, Tone::Mixed);
        assert_eq!(r.confidence, RiskConfidence::Low);
        assert!(r.factors.is_empty());
    }

    #[test]
    fn zero_vix_does_not_vote() {
        let r = assess_risk_tone(&PriceSnapshot::new().with("VIX", 0.0, 0.0));
        assert_eq!(r.risk_on_signals, 0);
        assert_eq!(r.tone, Tone::Mixed);
    }

    #[test]
    fn breadth_needs_outperformance_and_strength() {
        let weak = PriceSnapshot::new().with("RTY", 2300.0, 0.25).with("NQ", 21000.0, 0.1);
        assert_eq!(assess_risk_tone(&weak).risk_on_signals, 0);
        let lagging = PriceSnapshot::new().with("RTY", 2300.0, 0.5).with("NQ", 21000.0, 0.8);
        assert_eq!(assess_risk_tone(&lagging).risk_on_signals, 0);
    }

    #[test]
    fn tone_display_matches_serde() {
        let json = serde_json::to_value(Tone::LeanRiskOff).unwrap();
        assert_eq!(json, Tone::LeanRiskOff.to_string());
    }
}
