//! One detection cycle.
//!
//! A cycle is split in two phases:
//!   1. `fetch`  – the only suspension point; talks to the price source under
//!      a bounded timeout and degrades every failure to an empty batch.
//!   2. `apply`  – synchronous; updates history, runs the detector per symbol
//!      and appends at most one alert. Callers run it under the state lock.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use common::logger::warn_if_slow;
use corelib::{Alert, MarketStats, PriceSample, Symbol};
use engine::{Assessment, ConfigError, PumpDetector};
use market::PriceSource;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::metrics::{Counters, add, bump};
use crate::state::ScanState;
use crate::types::{CycleResult, ScannerConfig};

/// Fetches slower than this are logged on the `performance` target.
const SLOW_FETCH: Duration = Duration::from_secs(2);

/// Upstream data for one cycle.
#[derive(Debug, Default)]
pub struct FetchedBatch {
    pub prices: Vec<PriceSample>,
    pub stats: MarketStats,
    pub upstream_error: Option<String>,
}

pub struct Scanner {
    detector: PumpDetector,
    universe: HashSet<Symbol>,
    fetch_timeout: Duration,
    counters: Counters,
}

impl Scanner {
    pub fn new(cfg: &ScannerConfig, counters: Counters) -> Result<Self, ConfigError> {
        cfg.validate()?;

        Ok(Self {
            detector: PumpDetector::new(cfg.detector.clone())?,
            universe: cfg.universe.iter().cloned().collect(),
            fetch_timeout: cfg.fetch_timeout,
            counters,
        })
    }

    pub fn universe_size(&self) -> usize {
        self.universe.len()
    }

    /// Empty universe accepts everything.
    pub fn in_universe(&self, symbol: &str) -> bool {
        self.universe.is_empty() || self.universe.contains(symbol)
    }

    /// Pulls prices and market stats concurrently.
    ///
    /// Never fails: a price failure yields an empty batch with
    /// `upstream_error` set, a stats failure yields no stats.
    pub async fn fetch<S: PriceSource + ?Sized>(&self, source: &S) -> FetchedBatch {
        let (prices, stats) = tokio::join!(
            warn_if_slow(
                "fetch_prices",
                SLOW_FETCH,
                timeout(self.fetch_timeout, source.fetch_prices())
            ),
            warn_if_slow(
                "fetch_market_stats",
                SLOW_FETCH,
                timeout(self.fetch_timeout, source.fetch_market_stats())
            ),
        );

        let mut batch = FetchedBatch::default();

        match prices {
            Ok(Ok(p)) => batch.prices = p,
            Ok(Err(e)) => {
                bump(&self.counters.upstream_failures);
                warn!(error = %format!("{e:#}"), "price fetch failed; treating as empty batch");
                batch.upstream_error = Some(format!("{e:#}"));
            }
            Err(_) => {
                bump(&self.counters.upstream_failures);
                warn!(
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "price fetch timed out; treating as empty batch"
                );
                batch.upstream_error = Some(format!(
                    "price fetch timed out after {}ms",
                    self.fetch_timeout.as_millis()
                ));
            }
        }

        match stats {
            Ok(Ok(s)) => batch.stats = s,
            Ok(Err(e)) => {
                bump(&self.counters.stats_failures);
                warn!(error = %format!("{e:#}"), "market stats unavailable; continuing without");
            }
            Err(_) => {
                bump(&self.counters.stats_failures);
                warn!("market stats fetch timed out; continuing without");
            }
        }

        batch
    }

    /// Applies a fetched batch to `state`.
    ///
    /// Each symbol's evaluation is isolated: a panic inside the detector is
    /// logged and the remaining symbols are still processed.
    pub fn apply(&self, state: &mut ScanState, batch: FetchedBatch, now_ms: u64) -> CycleResult {
        bump(&self.counters.cycles_run);

        let FetchedBatch {
            prices,
            stats,
            upstream_error,
        } = batch;

        let mut result = CycleResult {
            upstream_error,
            ..Default::default()
        };

        if prices.is_empty() {
            bump(&self.counters.empty_batches);
            debug!("empty price batch; cycle is a no-op");
            state.last_cycle_at_ms = Some(now_ms);
            return result;
        }

        let ScanState {
            history,
            debounce,
            ledger,
            ..
        } = &mut *state;

        let mut pumps = Vec::new();

        for sample in prices {
            if !self.in_universe(&sample.symbol) {
                bump(&self.counters.samples_outside_universe);
                continue;
            }

            let symbol = sample.symbol.clone();
            if !history.update(sample) {
                bump(&self.counters.samples_rejected);
                continue;
            }
            result.samples_accepted += 1;

            let Some(window) = history.get(&symbol) else {
                continue;
            };
            let stat = stats.get(&symbol);

            let assessed = panic::catch_unwind(AssertUnwindSafe(|| {
                self.detector.assess(&symbol, window, debounce, stat, now_ms)
            }));

            match assessed {
                Ok(Assessment::Pump(pump)) => {
                    bump(&self.counters.pumps_emitted);
                    info!(
                        symbol = %pump.symbol,
                        margin_pct = pump.profit_margin_pct,
                        potential_profit = pump.potential_profit,
                        confidence = %pump.confidence,
                        "pump detected"
                    );
                    pumps.push(pump);
                }
                Ok(Assessment::Debounced { remaining_ms }) => {
                    bump(&self.counters.pumps_debounced);
                    debug!(symbol = %symbol, remaining_ms, "pump suppressed by debounce");
                }
                Ok(Assessment::Quiet | Assessment::NoSignal) => {}
                Err(_) => {
                    bump(&self.counters.evaluation_panics);
                    error!(symbol = %symbol, "detector panicked; skipping symbol for this cycle");
                }
            }
        }

        add(
            &self.counters.samples_accepted,
            result.samples_accepted as u64,
        );

        result.pumps_found = pumps.len();

        if let Some(alert) = Alert::from_cycle(pumps, now_ms) {
            result.alert_id = Some(alert.id);
            info!(
                alert_id = %alert.id,
                pumps = alert.pump_count(),
                total_potential_profit = alert.total_potential_profit,
                "alert recorded"
            );
            ledger.append(alert);
            bump(&self.counters.alerts_appended);
        }

        state.last_cycle_at_ms = Some(now_ms);
        result
    }
}
