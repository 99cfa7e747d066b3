use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Minimal counters for operational visibility.
#[derive(Clone, Default, Debug)]
pub struct Counters {
    pub cycles_run: Arc<AtomicU64>,
    pub cycles_skipped: Arc<AtomicU64>,

    // upstream
    pub empty_batches: Arc<AtomicU64>,
    pub upstream_failures: Arc<AtomicU64>,
    pub stats_failures: Arc<AtomicU64>,

    // ingestion
    pub samples_accepted: Arc<AtomicU64>,
    pub samples_rejected: Arc<AtomicU64>,
    pub samples_outside_universe: Arc<AtomicU64>,

    // detection
    pub pumps_emitted: Arc<AtomicU64>,
    pub pumps_debounced: Arc<AtomicU64>,
    pub alerts_appended: Arc<AtomicU64>,
    pub evaluation_panics: Arc<AtomicU64>,
}

/// Point-in-time copy of [`Counters`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersSnapshot {
    pub cycles_run: u64,
    pub cycles_skipped: u64,
    pub empty_batches: u64,
    pub upstream_failures: u64,
    pub stats_failures: u64,
    pub samples_accepted: u64,
    pub samples_rejected: u64,
    pub samples_outside_universe: u64,
    pub pumps_emitted: u64,
    pub pumps_debounced: u64,
    pub alerts_appended: u64,
    pub evaluation_panics: u64,
}

pub(crate) fn bump(c: &AtomicU64) {
    c.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn add(c: &AtomicU64, n: u64) {
    c.fetch_add(n, Ordering::Relaxed);
}

impl Counters {
    pub fn snapshot(&self) -> CountersSnapshot {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);

        CountersSnapshot {
            cycles_run: get(&self.cycles_run),
            cycles_skipped: get(&self.cycles_skipped),
            empty_batches: get(&self.empty_batches),
            upstream_failures: get(&self.upstream_failures),
            stats_failures: get(&self.stats_failures),
            samples_accepted: get(&self.samples_accepted),
            samples_rejected: get(&self.samples_rejected),
            samples_outside_universe: get(&self.samples_outside_universe),
            pumps_emitted: get(&self.pumps_emitted),
            pumps_debounced: get(&self.pumps_debounced),
            alerts_appended: get(&self.alerts_appended),
            evaluation_panics: get(&self.evaluation_panics),
        }
    }
}
