// =============================================================================
// Signal Tags - the closed vocabulary emitted by every metric
// =============================================================================

use serde::{Deserialize, Serialize};

/// Discrete signal attached to a metric result.  Serialises as the
/// SCREAMING_SNAKE_CASE tag consumers key on (`"RISK_OFF"`, `"HIGH_BETA"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalTag {
    Neutral,
    // Risk appetite
    RiskOn,
    RiskOff,
    Caution,
    Cautious,
    Fear,
    ExtremeFear,
    // Equity leadership
    Tech,
    Value,
    GrowthDominant,
    ValueDominant,
    Balanced,
    // Energy
    BullishRb,
    Bearish,
    // Rates / gold
    BearishGold,
    CautiousGold,
    BullishGold,
    // FX
    YenWeak,
    YenStrengthRisk,
    Strength,
    Weakness,
    Stable,
    // Crypto vs equities
    Normal,
    HighBeta,
    Divergence,
    /// Required input missing; the metric value is `None`.
    NoData,
}

impl SignalTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "NEUTRAL",
            Self::RiskOn => "RISK_ON",
            Self::RiskOff => "RISK_OFF",
            Self::Caution => "CAUTION",
            Self::Cautious => "CAUTIOUS",
            Self::Fear => "FEAR",
            Self::ExtremeFear => "EXTREME_FEAR",
            Self::Tech => "TECH",
            Self::Value => "VALUE",
            Self::GrowthDominant => "GROWTH_DOMINANT",
            Self::ValueDominant => "VALUE_DOMINANT",
            Self::Balanced => "BALANCED",
            Self::BullishRb => "BULLISH_RB",
            Self::Bearish => "BEARISH",
            Self::BearishGold => "BEARISH_GOLD",
            Self::CautiousGold => "CAUTIOUS_GOLD",
            Self::BullishGold => "BULLISH_GOLD",
            Self::YenWeak => "YEN_WEAK",
            Self::YenStrengthRisk => "YEN_STRENGTH_RISK",
            Self::Strength => "STRENGTH",
            Self::Weakness => "WEAKNESS",
            Self::Stable => "STABLE",
            Self::Normal => "NORMAL",
            Self::HighBeta => "HIGH_BETA",
            Self::Divergence => "DIVERGENCE",
            Self::NoData => "NO_DATA",
        }
    }
}

impl std::fmt::Display for SignalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional lean shared by summaries and per-instrument impact lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}
