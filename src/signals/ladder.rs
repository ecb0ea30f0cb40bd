// =============================================================================
// Threshold Ladder - "raw metric -> first matching rung -> discrete label"
// =============================================================================
//
// Every derived signal in the crate follows the same shape: compute a number,
// walk an ordered list of thresholds top-down, and emit the label/signal of the
// first rung that admits the number.  Ties resolve to the earlier rung.
//
//   Ladder::new()
//       .rung(Bound::Above(1.0), "NARROW_RALLY", SignalTag::Tech)
//       .rung(Bound::Below(-1.0), "ROTATION", SignalTag::Value)
//       .otherwise("BALANCED", SignalTag::Neutral)
// =============================================================================

use serde::Serialize;

/// Admission test for a single rung.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Bound {
    /// `value > x`
    Above(f64),
    /// `value < x`
    Below(f64),
    /// `value >= x`
    AtLeast(f64),
    /// Catch-all; always admits.
    Always,
}

impl Bound {
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Self::Above(x) => value > x,
            Self::Below(x) => value < x,
            Self::AtLeast(x) => value >= x,
            Self::Always => true,
        }
    }
}

/// One step of a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rung<S> {
    pub bound: Bound,
    pub label: &'static str,
    pub signal: S,
}

/// Ordered, first-match-wins classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ladder<S> {
    rungs: Vec<Rung<S>>,
}

impl<S: Copy> Ladder<S> {
    pub fn new() -> Self {
        Self { rungs: Vec::new() }
    }

    pub fn rung(mut self, bound: Bound, label: &'static str, signal: S) -> Self {
        self.rungs.push(Rung {
            bound,
            label,
            signal,
        });
        self
    }

    /// Terminal catch-all rung.
    pub fn otherwise(self, label: &'static str, signal: S) -> Self {
        self.rung(Bound::Always, label, signal)
    }

    /// First rung admitting `value`.  NaN only matches `Always`.
    pub fn classify(&self, value: f64) -> Option<&Rung<S>> {
        self.rungs.iter().find(|r| r.bound.admits(value))
    }

    pub fn rungs(&self) -> &[Rung<S>] {
        &self.rungs
    }
}

impl<S: Copy> Default for Ladder<S> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Ladder<i32> {
        Ladder::new()
            .rung(Bound::Above(1.0), "HIGH", 2)
            .rung(Bound::Above(0.3), "MID", 1)
            .rung(Bound::Below(-0.3), "LOW", -1)
            .otherwise("FLAT", 0)
    }

    #[test]
    fn first_match_wins() {
        // 1.5 satisfies both "HIGH" and "MID"; the earlier rung wins.
        let ladder = sample();
        let rung = ladder.classify(1.5).unwrap();
        assert_eq!(rung.label, "HIGH");
        assert_eq!(rung.signal, 2);
    }

    #[test]
    fn boundaries_are_strict_for_above_and_below() {
        assert_eq!(sample().classify(1.0).unwrap().label, "MID");
        assert_eq!(sample().classify(0.3).unwrap().label, "FLAT");
        assert_eq!(sample().classify(-0.3).unwrap().label, "FLAT");
        assert_eq!(sample().classify(-0.31).unwrap().label, "LOW");
    }

    #[test]
    fn at_least_is_inclusive() {
        let ladder = Ladder::new()
            .rung(Bound::AtLeast(7.0), "HOT", 3)
            .otherwise("COLD", 0);
        assert_eq!(ladder.classify(7.0).unwrap().label, "HOT");
        assert_eq!(ladder.classify(6.99).unwrap().label, "COLD");
    }

    #[test]
    fn nan_falls_through_to_catch_all() {
        assert_eq!(sample().classify(f64::NAN).unwrap().label, "FLAT");
    }

    #[test]
    fn ladder_without_catch_all_can_miss() {
        let ladder: Ladder<i32> = Ladder::new().rung(Bound::Above(10.0), "BIG", 1);
        assert!(ladder.classify(3.0).is_none());
        assert_eq!(ladder.rungs().len(), 1);
    }
}
