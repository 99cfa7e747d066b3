use std::collections::HashMap;

use corelib::Symbol;

/// Last time a pump was emitted per symbol.
///
/// Entries are never evicted; the map is bounded by the monitoring universe.
#[derive(Debug, Default, Clone)]
pub struct DebounceState {
    last_fired_ms: HashMap<Symbol, u64>,
}

impl DebounceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_fired(&self, symbol: &str) -> Option<u64> {
        self.last_fired_ms.get(symbol).copied()
    }

    /// Remaining cooldown for `symbol` at `now_ms`, or `None` if it may fire.
    pub fn remaining(&self, symbol: &str, now_ms: u64, window_ms: u64) -> Option<u64> {
        let last = self.last_fired(symbol)?;
        let elapsed = now_ms.saturating_sub(last);
        (elapsed < window_ms).then(|| window_ms - elapsed)
    }

    pub fn record(&mut self, symbol: &str, now_ms: u64) {
        self.last_fired_ms.insert(symbol.to_string(), now_ms);
    }

    pub fn len(&self) -> usize {
        self.last_fired_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_fired_ms.is_empty()
    }

    pub fn clear(&mut self) {
        self.last_fired_ms.clear();
    }
}
