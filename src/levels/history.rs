// =============================================================================
// Sweep History - bounded, newest-first event store
// =============================================================================
//
// An owned store the host constructs once and shares via `Arc<SweepHistory>`.
// All writes go through a single write lock so that, after every insertion,
// the buffer is ordered newest-first and holds at most `capacity` events.
// Readers take the read lock and clone what they return.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SweepParams;
use crate::market_data::{normalize_symbol, LevelBarProvider, SweepBar};
use crate::signals::Bias;

use super::sweep::{classify_bar, SweepEvent, SweepType};

/// Counts by sweep type over the most recent window, with the bias they imply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSummary {
    pub symbol: Option<String>,
    pub total: usize,
    pub bullish_sweeps: usize,
    pub bearish_sweeps: usize,
    pub failed_supports: usize,
    pub breakouts: usize,
    pub manual: usize,
    pub bias: Bias,
    pub latest: Option<SweepEvent>,
}

pub struct SweepHistory {
    events: RwLock<VecDeque<SweepEvent>>,
    params: SweepParams,
}

impl Default for SweepHistory {
    fn default() -> Self {
        Self::new()
    }
}

fn symbol_matches(event: &SweepEvent, symbol: Option<&str>) -> bool {
    match symbol {
        Some(sym) => normalize_symbol(&event.symbol) == normalize_symbol(sym),
        None => true,
    }
}

/// Bias from per-type counts.
///
/// Sweeps decide first (one side must lead by two); only a neutral read is
/// then tipped by failed supports versus breakouts.
fn summary_bias(bullish: usize, bearish: usize, failed: usize, breakouts: usize) -> Bias {
    let bias = if bullish > bearish + 1 {
        Bias::Bullish
    } else if bearish > bullish + 1 {
        Bias::Bearish
    } else {
        Bias::Neutral
    };

    if bias != Bias::Neutral {
        return bias;
    }
    if failed > breakouts {
        Bias::Bearish
    } else if breakouts > failed {
        Bias::Bullish
    } else {
        Bias::Neutral
    }
}

impl SweepHistory {
    /// Store with the default capacity (100) and windows.
    pub fn new() -> Self {
        Self::with_params(SweepParams::default())
    }

    pub fn with_params(params: SweepParams) -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(params.capacity + 1)),
            params,
        }
    }

    pub fn params(&self) -> &SweepParams {
        &self.params
    }

    pub fn capacity(&self) -> usize {
        self.params.capacity
    }

    // ── Writes ──────────────────────────────────────────────────────────

    /// Classify `bar` now and record whatever it produced.
    pub fn detect_sweep(&self, bar: &SweepBar) -> Vec<SweepEvent> {
        self.detect_sweep_at(bar, Utc::now())
    }

    /// Same as [`detect_sweep`](Self::detect_sweep) with an explicit clock.
    pub fn detect_sweep_at(&self, bar: &SweepBar, now: DateTime<Utc>) -> Vec<SweepEvent> {
        let events = classify_bar(bar, now);
        for event in &events {
            info!(
                symbol = %event.symbol,
                level = %event.level_name,
                level_price = event.level_price,
                sweep_type = %event.sweep_type,
                "sweep detected"
            );
        }
        if !events.is_empty() {
            self.append(events.iter().cloned());
        }
        events
    }

    /// Pull the live bar for `symbol` from `provider` and run detection on it.
    ///
    /// A provider with no bar yields no events.
    pub fn detect_from<P>(&self, provider: &P, symbol: &str) -> Vec<SweepEvent>
    where
        P: LevelBarProvider + ?Sized,
    {
        match provider.current_bar(symbol) {
            Some(bar) => self.detect_sweep(&bar),
            None => {
                debug!(symbol, "no bar available for sweep detection");
                Vec::new()
            }
        }
    }

    /// Record an externally supplied event.
    pub fn add_sweep(&self, event: SweepEvent) {
        self.append(std::iter::once(event));
    }

    /// Push `events` to the front in order, so the last one ends up newest,
    /// then evict from the back down to capacity.
    pub fn append<I>(&self, events: I)
    where
        I: IntoIterator<Item = SweepEvent>,
    {
        let mut buf = self.events.write();
        for event in events {
            buf.push_front(event);
        }
        let evicted = buf.len().saturating_sub(self.params.capacity);
        buf.truncate(self.params.capacity);
        if evicted > 0 {
            debug!(evicted, retained = buf.len(), "sweep history trimmed");
        }
    }

    /// Empty the store, e.g. at the daily session reset.
    pub fn clear(&self) {
        let mut buf = self.events.write();
        let dropped = buf.len();
        buf.clear();
        info!(dropped, "sweep history cleared");
    }

    // ── Reads ───────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    /// Copy of the whole buffer, newest first.
    pub fn snapshot(&self) -> Vec<SweepEvent> {
        self.events.read().iter().cloned().collect()
    }

    /// Up to `limit` newest events, optionally for one symbol.
    ///
    /// `limit` defaults to `recent_limit` (20).
    pub fn recent_sweeps(&self, symbol: Option<&str>, limit: Option<usize>) -> Vec<SweepEvent> {
        let limit = limit.unwrap_or(self.params.recent_limit);
        self.events
            .read()
            .iter()
            .filter(|e| symbol_matches(e, symbol))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Type counts and bias over the newest `summary_window` (50) events.
    pub fn sweep_summary(&self, symbol: Option<&str>) -> SweepSummary {
        let buf = self.events.read();
        let window: Vec<&SweepEvent> = buf
            .iter()
            .filter(|e| symbol_matches(e, symbol))
            .take(self.params.summary_window)
            .collect();

        let count = |t: SweepType| window.iter().filter(|e| e.sweep_type == t).count();
        let bullish_sweeps = count(SweepType::BullishSweep);
        let bearish_sweeps = count(SweepType::BearishSweep);
        let failed_supports = count(SweepType::FailedSupport);
        let breakouts = count(SweepType::Breakout);
        let manual = count(SweepType::Manual);

        SweepSummary {
            symbol: symbol.map(normalize_symbol),
            total: window.len(),
            bullish_sweeps,
            bearish_sweeps,
            failed_supports,
            breakouts,
            manual,
            bias: summary_bias(bullish_sweeps, bearish_sweeps, failed_supports, breakouts),
            latest: window.first().map(|e| (*e).clone()),
        }
    }

    /// Most recent event at `level_name`, if it happened within the window.
    ///
    /// `within_minutes` defaults to `lookback_minutes` (60).
    pub fn was_level_swept(
        &self,
        symbol: &str,
        level_name: &str,
        within_minutes: Option<i64>,
    ) -> Option<SweepEvent> {
        self.was_level_swept_at(symbol, level_name, within_minutes, Utc::now())
    }

    pub fn was_level_swept_at(
        &self,
        symbol: &str,
        level_name: &str,
        within_minutes: Option<i64>,
        now: DateTime<Utc>,
    ) -> Option<SweepEvent> {
        let window = Duration::minutes(within_minutes.unwrap_or(self.params.lookback_minutes));
        let cutoff = now - window;

        self.events
            .read()
            .iter()
            .find(|e| {
                symbol_matches(e, Some(symbol)) && e.level_name.eq_ignore_ascii_case(level_name)
            })
            .filter(|e| e.timestamp >= cutoff)
            .cloned()
    }

    /// Newest reclaimed event per (symbol, level).
    pub fn reclaimed_levels(&self, symbol: Option<&str>) -> Vec<SweepEvent> {
        let mut seen = HashSet::new();
        self.events
            .read()
            .iter()
            .filter(|e| e.reclaimed && symbol_matches(e, symbol))
            .filter(|e| seen.insert((normalize_symbol(&e.symbol), e.level_name.clone())))
            .cloned()
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::{Candle, LevelSet};
    use std::sync::Arc;

    fn event(
        symbol: &str,
        level: &str,
        kind: SweepType,
        seq: usize,
        ts: DateTime<Utc>,
    ) -> SweepEvent {
        let p = seq as f64;
        let mut e = SweepEvent::manual(symbol, level, p, p, p, kind.is_reclaim(), ts);
        e.sweep_type = kind;
        e
    }

    fn pdl_bar(symbol: &str) -> SweepBar {
        let mut levels = LevelSet::new();
        levels.insert("PDL".into(), Some(100.0));
        SweepBar::new(symbol, Candle::new(101.0, 102.0, 99.0, 101.5), levels)
    }

    #[test]
    fn capacity_evicts_oldest() {
        let history = SweepHistory::new();
        let now = Utc::now();
        for seq in 0..105 {
            history.add_sweep(event("ES", "PDL", SweepType::BullishSweep, seq, now));
        }
        assert_eq!(history.len(), 100);
        let all = history.snapshot();
        assert_eq!(all.first().unwrap().level_price, 104.0);
        assert_eq!(all.last().unwrap().level_price, 5.0);
        assert!(all.windows(2).all(|w| w[0].level_price > w[1].level_price));
    }

    #[test]
    fn detect_records_events() {
        let history = SweepHistory::new();
        let events = history.detect_sweep(&pdl_bar("ES"));
        assert_eq!(events.len(), 1);
        assert_eq!(history.len(), 1);
        assert_eq!(history.snapshot()[0].id, events[0].id);

        // no pattern, nothing recorded
        let mut quiet = pdl_bar("ES");
        quiet.low = 100.5;
        assert!(history.detect_sweep(&quiet).is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn recent_filters_by_symbol_and_limit() {
        let history = SweepHistory::new();
        let now = Utc::now();
        for seq in 0..30 {
            let sym = if seq % 2 == 0 { "ES" } else { "NQ" };
            history.add_sweep(event(sym, "VWAP", SweepType::Breakout, seq, now));
        }
        assert_eq!(history.recent_sweeps(None, None).len(), 20);
        let es = history.recent_sweeps(Some("ES=F"), Some(5));
        assert_eq!(es.len(), 5);
        assert!(es.iter().all(|e| e.symbol == "ES"));
        assert_eq!(es[0].level_price, 28.0);
    }

    #[test]
    fn summary_bias_from_sweeps() {
        let history = SweepHistory::new();
        let now = Utc::now();
        for seq in 0..3 {
            history.add_sweep(event("ES", "PDL", SweepType::BullishSweep, seq, now));
        }
        history.add_sweep(event("ES", "PDH", SweepType::BearishSweep, 3, now));
        let s = history.sweep_summary(Some("ES"));
        assert_eq!((s.bullish_sweeps, s.bearish_sweeps), (3, 1));
        assert_eq!(s.bias, Bias::Bullish);
        assert_eq!(s.latest.unwrap().sweep_type, SweepType::BearishSweep);
    }

    #[test]
    fn summary_neutral_tipped_by_failures() {
        let history = SweepHistory::new();
        let now = Utc::now();
        history.add_sweep(event("ES", "PDL", SweepType::BullishSweep, 0, now));
        history.add_sweep(event("ES", "PDL", SweepType::FailedSupport, 1, now));
        history.add_sweep(event("ES", "IB", SweepType::FailedSupport, 2, now));
        history.add_sweep(event("ES", "PDH", SweepType::Breakout, 3, now));
        assert_eq!(history.sweep_summary(None).bias, Bias::Bearish);

        history.clear();
        history.add_sweep(event("ES", "PDH", SweepType::Breakout, 0, now));
        assert_eq!(history.sweep_summary(None).bias, Bias::Bullish);

        history.clear();
        let empty = history.sweep_summary(None);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.bias, Bias::Neutral);
    }

    #[test]
    fn summary_window_is_fifty() {
        let history = SweepHistory::new();
        let now = Utc::now();
        for seq in 0..60 {
            history.add_sweep(event("ES", "PDL", SweepType::BullishSweep, seq, now));
        }
        assert_eq!(history.sweep_summary(None).total, 50);
    }

    #[test]
    fn level_swept_within_window() {
        let history = SweepHistory::new();
        let now = Utc::now();
        let pdh = event("ES", "PDH", SweepType::BearishSweep, 0, now - Duration::minutes(90));
        let pdl = event("ES", "PDL", SweepType::BullishSweep, 1, now - Duration::minutes(30));
        history.add_sweep(pdh);
        history.add_sweep(pdl);

        assert!(history.was_level_swept_at("ES", "PDL", None, now).is_some());
        assert!(history.was_level_swept_at("ES", "PDH", None, now).is_none());
        assert!(history.was_level_swept_at("ES", "PDH", Some(120), now).is_some());
        assert!(history.was_level_swept_at("NQ", "PDL", None, now).is_none());
    }

    #[test]
    fn reclaimed_levels_deduplicated() {
        let history = SweepHistory::new();
        let now = Utc::now();
        history.add_sweep(event("ES", "PDL", SweepType::BullishSweep, 0, now));
        history.add_sweep(event("ES", "PDL", SweepType::BullishSweep, 1, now));
        history.add_sweep(event("ES", "PDH", SweepType::Breakout, 2, now));
        history.add_sweep(event("NQ", "VWAP", SweepType::BearishSweep, 3, now));

        let all = history.reclaimed_levels(None);
        assert_eq!(all.len(), 2);
        let es = history.reclaimed_levels(Some("ES"));
        assert_eq!(es.len(), 1);
        assert_eq!(es[0].level_price, 1.0);
    }

    struct OneBar;

    impl LevelBarProvider for OneBar {
        fn current_bar(&self, symbol: &str) -> Option<SweepBar> {
            (symbol == "ES").then(|| pdl_bar("ES"))
        }
    }

    #[test]
    fn detect_from_provider() {
        let history = SweepHistory::new();
        assert_eq!(history.detect_from(&OneBar, "ES").len(), 1);
        assert!(history.detect_from(&OneBar, "CL").is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn custom_capacity() {
        let history = SweepHistory::with_params(SweepParams {
            capacity: 3,
            ..SweepParams::default()
        });
        let now = Utc::now();
        history.append((0..10).map(|seq| event("ES", "PDL", SweepType::Breakout, seq, now)));
        assert_eq!(history.len(), 3);
        assert_eq!(history.snapshot()[0].level_price, 9.0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_keep_invariants() {
        let history = Arc::new(SweepHistory::new());
        let now = Utc::now();

        let mut handles = Vec::new();
        for writer in 0..8 {
            let history = Arc::clone(&history);
            handles.push(tokio::spawn(async move {
                let symbol = format!("W{}", writer);
                for seq in 0..50 {
                    history.add_sweep(event(&symbol, "PDL", SweepType::BullishSweep, seq, now));
                    assert!(history.len() <= 100);
                    tokio::task::yield_now().await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(history.len(), 100);
        // each writer's surviving events are still newest-first
        let all = history.snapshot();
        for writer in 0..8 {
            let symbol = format!("W{}", writer);
            let seqs: Vec<f64> = all
                .iter()
                .filter(|e| e.symbol == symbol)
                .map(|e| e.level_price)
                .collect();
            assert!(seqs.windows(2).all(|w| w[0] > w[1]));
        }
    }
}
