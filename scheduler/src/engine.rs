//! The scanner engine.
//!
//! Facade the orchestration/transport layer talks to. Each cycle it:
//!   1. Takes the cycle gate, or reports the tick as skipped.
//!   2. Fetches prices and market stats without holding the state lock.
//!   3. Applies the batch under one write guard on the scan state.
//!   4. Records the pump count on the cycle's root span.
//!
//! Locking discipline: the network fetch runs without the state lock; the
//! whole apply phase runs under a single write guard that is never held
//! across an `.await`. Queries take the read guard and therefore observe
//! either the pre-cycle or the post-cycle state.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::logger::{TraceId, root_span};
use corelib::PriceSample;
use engine::{ConfigError, TopPerformer};
use market::PriceSource;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, field, info, instrument, warn};

use crate::metrics::{Counters, bump};
use crate::scanner::Scanner;
use crate::state::ScanState;
use crate::types::{CycleResult, HistoryView, LivePumpsView, ScannerConfig, StatusView};

pub struct ScannerEngine<S> {
    source: S,
    scanner: Scanner,
    state: RwLock<ScanState>,

    /// Held for the full duration of a cycle (and by `reset`).
    cycle_gate: Mutex<()>,

    active: AtomicBool,
    max_alerts: usize,
    counters: Counters,
}

impl<S: PriceSource> ScannerEngine<S> {
    /// Validates `cfg` and builds an inactive engine wrapped in `Arc` so the
    /// scan loop and query handlers can share it.
    pub fn new(cfg: ScannerConfig, source: S) -> Result<Arc<Self>, ConfigError> {
        let counters = Counters::default();
        let scanner = Scanner::new(&cfg, counters.clone())?;

        info!(
            universe = cfg.universe.len(),
            window_ms = cfg.history.window_ms,
            max_points = cfg.history.max_points,
            max_alerts = cfg.max_alerts,
            min_margin_pct = cfg.detector.min_profit_margin_pct,
            "scanner engine created"
        );

        Ok(Arc::new(Self {
            source,
            scanner,
            state: RwLock::new(ScanState::new(&cfg)),
            cycle_gate: Mutex::new(()),
            active: AtomicBool::new(false),
            max_alerts: cfg.max_alerts,
            counters,
        }))
    }

    /// Runs one fetch → update → detect → record cycle.
    ///
    /// If a cycle is already in flight this returns immediately with
    /// `skipped = true`; cycles never run concurrently.
    pub async fn run_cycle(&self, now_ms: u64) -> CycleResult {
        let Ok(_gate) = self.cycle_gate.try_lock() else {
            bump(&self.counters.cycles_skipped);
            warn!("previous cycle still in flight; skipping tick");
            return CycleResult::skipped();
        };

        let trace_id = TraceId::default();
        let span = root_span("scan_cycle", &trace_id);

        async {
            let batch = self.scanner.fetch(&self.source).await;
            let fetched = batch.prices.len();

            let result = {
                let mut state = self.state.write();
                self.scanner.apply(&mut state, batch, now_ms)
            };

            tracing::Span::current().record("pumps", field::display(result.pumps_found));

            if result.pumps_found > 0 {
                info!(
                    fetched,
                    accepted = result.samples_accepted,
                    pumps = result.pumps_found,
                    "cycle complete"
                );
            } else {
                debug!(fetched, accepted = result.samples_accepted, "cycle complete");
            }

            result
        }
        .instrument(span)
        .await
    }

    /// Marks the engine active. Returns `false` if it already was.
    pub fn start(&self) -> bool {
        let changed = !self.active.swap(true, Ordering::SeqCst);
        if changed {
            info!("scanner started");
        }
        changed
    }

    /// Marks the engine inactive. An in-flight cycle is allowed to finish.
    /// Returns `false` if it already was inactive.
    pub fn stop(&self) -> bool {
        let changed = self.active.swap(false, Ordering::SeqCst);
        if changed {
            info!("scanner stopped");
        }
        changed
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Clears history, debounce state and the ledger.
    ///
    /// Waits for any in-flight cycle to finish first, so a reset never
    /// interleaves with an append.
    #[instrument(skip(self), target = "scheduler")]
    pub async fn reset(&self) {
        let _gate = self.cycle_gate.lock().await;

        let mut state = self.state.write();
        let symbols = state.history.size();
        let alerts = state.ledger.len();
        state.reset();

        info!(symbols, alerts, "scanner state reset");
    }

    pub fn live_pumps(&self) -> LivePumpsView {
        let state = self.state.read();
        LivePumpsView {
            pumps: state.ledger.latest_pumps().to_vec(),
            summary: state.ledger.summary(),
        }
    }

    /// Most recent alerts, oldest first. `limit` is clamped to the ledger bound.
    pub fn history(&self, limit: usize) -> HistoryView {
        let state = self.state.read();
        HistoryView {
            alerts: state.ledger.recent(limit.min(self.max_alerts)),
            total: state.ledger.len(),
        }
    }

    pub fn top_performers(&self, limit: usize) -> Vec<TopPerformer> {
        self.state.read().ledger.top_performers(limit)
    }

    /// Retained price window for one symbol.
    pub fn window(&self, symbol: &str) -> Vec<PriceSample> {
        self.state.read().history.window(symbol)
    }

    pub fn status(&self) -> StatusView {
        let state = self.state.read();
        StatusView {
            active: self.is_active(),
            tracked_symbols: state.history.size(),
            history_size: state.history.total_samples(),
            alert_count: state.ledger.len(),
            universe_size: self.scanner.universe_size(),
            last_cycle_at_ms: state.last_cycle_at_ms,
            counters: self.counters.snapshot(),
        }
    }
}
