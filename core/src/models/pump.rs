use std::fmt;

use serde::{Deserialize, Serialize};

use super::price::{MarketStat, Symbol};

/// Coarse severity tier derived from the profit margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Low => "LOW",
            Confidence::Medium => "MEDIUM",
            Confidence::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// A short-window upward price anomaly for one symbol.
///
/// All percentages are simple relative differences (not log-returns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpEvent {
    pub symbol: Symbol,

    pub current_price: f64,
    pub min_price: f64,
    pub avg_price: f64,
    pub max_price: f64,

    /// max(change_from_min_pct, change_from_avg_pct)
    pub profit_margin_pct: f64,
    /// capital * profit_margin_pct / 100
    pub potential_profit: f64,

    pub change_from_min_pct: f64,
    pub change_from_avg_pct: f64,
    pub volatility_pct: f64,

    pub confidence: Confidence,

    /// Number of samples in the window at detection time.
    pub data_point_count: usize,
    pub detected_at_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_stat: Option<MarketStat>,
}
