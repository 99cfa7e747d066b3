//! Mutable scanner state.
//!
//! Everything a cycle mutates lives in one value so it can sit behind a
//! single lock: readers see either the pre-cycle or the post-cycle state,
//! never a half-updated window.

use engine::{AlertLedger, DebounceState};
use market::HistoryStore;

use crate::types::ScannerConfig;

#[derive(Debug)]
pub struct ScanState {
    pub history: HistoryStore,
    pub debounce: DebounceState,
    pub ledger: AlertLedger,

    /// Completion time of the last applied cycle.
    pub last_cycle_at_ms: Option<u64>,
}

impl ScanState {
    pub fn new(cfg: &ScannerConfig) -> Self {
        Self {
            history: HistoryStore::new(cfg.history),
            debounce: DebounceState::new(),
            ledger: AlertLedger::new(cfg.max_alerts),
            last_cycle_at_ms: None,
        }
    }

    /// Clears history, debounce and ledger together.
    pub fn reset(&mut self) {
        self.history.clear();
        self.debounce.clear();
        self.ledger.reset();
        self.last_cycle_at_ms = None;
    }
}
