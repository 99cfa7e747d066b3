//! Per-symbol price history.
//!
//! `HistoryStore` owns one `SymbolWindow` per symbol, created lazily on the
//! first accepted sample. Memory is bounded twice over: by time (stale data
//! ages out on a slow trickle) and by count (bursty ingestion or clock skew
//! cannot grow a window past `max_points`).

use std::collections::HashMap;

use corelib::{PriceSample, Symbol};
use tracing::debug;

use crate::rolling_window::{DEFAULT_MAX_AGE_MS, DEFAULT_MAX_POINTS, SymbolWindow};

/// Window bounds applied to every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Samples older than this (relative to the newest) are dropped.
    pub window_ms: u64,
    /// Hard cap on samples per symbol.
    pub max_points: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_MAX_AGE_MS,
            max_points: DEFAULT_MAX_POINTS,
        }
    }
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    cfg: HistoryConfig,
    windows: HashMap<Symbol, SymbolWindow>,
}

impl HistoryStore {
    pub fn new(cfg: HistoryConfig) -> Self {
        Self {
            cfg,
            windows: HashMap::new(),
        }
    }

    /// Appends `sample` to its symbol's window.
    ///
    /// Malformed samples (price <= 0 or non-finite) are dropped without
    /// creating a window, as are late samples already older than the
    /// window. Returns whether the sample was accepted.
    pub fn update(&mut self, sample: PriceSample) -> bool {
        if !sample.is_well_formed() {
            debug!(symbol = %sample.symbol, price = sample.price, "rejected malformed price sample");
            return false;
        }

        let cfg = self.cfg;
        let symbol = sample.symbol.clone();
        let observed_at_ms = sample.observed_at_ms;

        let accepted = self
            .windows
            .entry(symbol)
            .or_insert_with(|| SymbolWindow::new(cfg.window_ms, cfg.max_points))
            .push(sample);

        if !accepted {
            debug!(observed_at_ms, "rejected price sample older than the window");
        }
        accepted
    }

    /// Borrowed view of a symbol's window.
    pub fn get(&self, symbol: &str) -> Option<&SymbolWindow> {
        self.windows.get(symbol)
    }

    /// Copy of the retained samples for `symbol`, oldest first. Empty for
    /// unknown symbols.
    pub fn window(&self, symbol: &str) -> Vec<PriceSample> {
        self.windows
            .get(symbol)
            .map(SymbolWindow::to_vec)
            .unwrap_or_default()
    }

    /// Number of tracked symbols.
    pub fn size(&self) -> usize {
        self.windows.len()
    }

    /// Total samples held across all windows.
    pub fn total_samples(&self) -> usize {
        self.windows.values().map(SymbolWindow::len).sum()
    }

    pub fn clear(&mut self) {
        self.windows.clear();
    }
}
