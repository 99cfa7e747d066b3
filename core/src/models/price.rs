use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Exchange symbol, e.g. `BTCUSDT`. Opaque; only membership in the
/// monitoring universe is ever checked.
pub type Symbol = String;

/// One observed price for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub symbol: Symbol,
    pub price: f64,
    /// Observation time (ms since epoch).
    pub observed_at_ms: u64,
}

impl PriceSample {
    pub fn new(symbol: impl Into<Symbol>, price: f64, observed_at_ms: u64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            observed_at_ms,
        }
    }

    /// Prices must be strictly positive and finite to enter a window.
    pub fn is_well_formed(&self) -> bool {
        self.price.is_finite() && self.price > 0.0
    }
}

/// Rolling 24h statistics for a symbol, as reported by the exchange.
///
/// Only the latest snapshot is ever used; nothing is retained across cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketStat {
    pub volume_24h: f64,
    pub quote_volume_24h: f64,
    pub change_24h_pct: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub trade_count_24h: u64,
}

/// Per-cycle market statistics keyed by symbol. Possibly partial.
pub type MarketStats = HashMap<Symbol, MarketStat>;
