//! Derived views over the alert ledger.

use std::cmp::Ordering;
use std::collections::HashMap;

use corelib::{Alert, Symbol};
use serde::{Deserialize, Serialize};

/// Per-symbol aggregate across all retained alerts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub symbol: Symbol,
    /// Number of pumps recorded for the symbol.
    pub count: usize,
    pub max_profit_margin_pct: f64,
    pub avg_profit_margin_pct: f64,
    /// Mean 24h volume over the pumps that carried market stats; 0 if none did.
    pub avg_volume_24h: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total_alerts: usize,
    /// Sum of pump counts over every retained alert.
    pub total_opportunities: usize,
    /// Potential profit of the latest alert only.
    pub total_potential_profit: f64,
}

#[derive(Default)]
struct Acc {
    count: usize,
    max_margin: f64,
    margin_sum: f64,
    volume_sum: f64,
    volume_n: usize,
}

/// Groups pumps by symbol and ranks them.
///
/// Order: `max_profit_margin_pct` desc, then `count` desc, then symbol asc,
/// so equal ledgers always rank identically.
pub fn rank_top_performers<'a>(
    alerts: impl IntoIterator<Item = &'a Alert>,
    limit: usize,
) -> Vec<TopPerformer> {
    let mut by_symbol: HashMap<&'a str, Acc> = HashMap::new();

    for pump in alerts.into_iter().flat_map(|a| a.pumps.iter()) {
        let acc = by_symbol.entry(pump.symbol.as_str()).or_insert_with(|| Acc {
            max_margin: f64::NEG_INFINITY,
            ..Default::default()
        });

        acc.count += 1;
        acc.max_margin = acc.max_margin.max(pump.profit_margin_pct);
        acc.margin_sum += pump.profit_margin_pct;

        if let Some(stat) = &pump.market_stat {
            acc.volume_sum += stat.volume_24h;
            acc.volume_n += 1;
        }
    }

    let mut ranked: Vec<TopPerformer> = by_symbol
        .into_iter()
        .map(|(symbol, acc)| TopPerformer {
            symbol: symbol.to_string(),
            count: acc.count,
            max_profit_margin_pct: acc.max_margin,
            avg_profit_margin_pct: acc.margin_sum / acc.count as f64,
            avg_volume_24h: if acc.volume_n > 0 {
                acc.volume_sum / acc.volume_n as f64
            } else {
                0.0
            },
        })
        .collect();

    ranked.sort_by(compare_performers);
    ranked.truncate(limit);
    ranked
}

fn compare_performers(a: &TopPerformer, b: &TopPerformer) -> Ordering {
    b.max_profit_margin_pct
        .total_cmp(&a.max_profit_margin_pct)
        .then_with(|| b.count.cmp(&a.count))
        .then_with(|| a.symbol.cmp(&b.symbol))
}
