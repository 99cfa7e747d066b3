use corelib::{MarketStat, PumpEvent};
use market::SymbolWindow;

use super::debounce::DebounceState;
use super::stats::WindowStats;
use crate::config::DetectorConfig;
use crate::error::ConfigError;

/// Outcome of assessing one symbol's window.
#[derive(Debug, Clone, PartialEq)]
pub enum Assessment {
    /// Fewer than two samples, or a degenerate window (zero minimum,
    /// non-finite math). Never an anomaly.
    NoSignal,

    /// Window is healthy but no criterion crossed its threshold.
    Quiet,

    /// Anomalous, but the symbol already fired within the debounce window.
    Debounced { remaining_ms: u64 },

    /// Anomaly emitted; debounce state has been updated.
    Pump(PumpEvent),
}

impl Assessment {
    pub fn into_pump(self) -> Option<PumpEvent> {
        match self {
            Assessment::Pump(p) => Some(p),
            _ => None,
        }
    }
}

/// Multi-criteria pump detector.
///
/// Stateless apart from the caller-owned `DebounceState`. The anomaly
/// predicate is an OR of three signals scaled off `T`
/// (`min_profit_margin_pct`):
///
/// | signal                 | fires when        |
/// |------------------------|-------------------|
/// | change from window min | `>= T`            |
/// | change from window avg | `>= T / 2`        |
/// | window volatility      | `>= 2T`           |
#[derive(Debug, Clone)]
pub struct PumpDetector {
    cfg: DetectorConfig,
}

impl PumpDetector {
    pub fn new(cfg: DetectorConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Evaluates `window` and returns a pump if one should be emitted now.
    pub fn evaluate(
        &self,
        symbol: &str,
        window: &SymbolWindow,
        debounce: &mut DebounceState,
        market_stat: Option<&MarketStat>,
        now_ms: u64,
    ) -> Option<PumpEvent> {
        self.assess(symbol, window, debounce, market_stat, now_ms)
            .into_pump()
    }

    /// Same as [`evaluate`](Self::evaluate) but reports why nothing fired.
    pub fn assess(
        &self,
        symbol: &str,
        window: &SymbolWindow,
        debounce: &mut DebounceState,
        market_stat: Option<&MarketStat>,
        now_ms: u64,
    ) -> Assessment {
        let Some(stats) = WindowStats::compute(window) else {
            return Assessment::NoSignal;
        };

        if !self.is_anomalous(&stats) {
            return Assessment::Quiet;
        }

        if let Some(remaining_ms) = debounce.remaining(symbol, now_ms, self.cfg.debounce_ms) {
            return Assessment::Debounced { remaining_ms };
        }
        debounce.record(symbol, now_ms);

        Assessment::Pump(self.build_event(symbol, &stats, market_stat, now_ms))
    }

    /// Threshold ties count as anomalies.
    pub fn is_anomalous(&self, stats: &WindowStats) -> bool {
        let t = self.cfg.min_profit_margin_pct;

        stats.change_from_min_pct >= t
            || stats.change_from_avg_pct >= t / 2.0
            || stats.volatility_pct >= 2.0 * t
    }

    fn build_event(
        &self,
        symbol: &str,
        stats: &WindowStats,
        market_stat: Option<&MarketStat>,
        now_ms: u64,
    ) -> PumpEvent {
        let profit_margin_pct = stats.change_from_min_pct.max(stats.change_from_avg_pct);
        let potential_profit = self.cfg.capital * profit_margin_pct / 100.0;

        PumpEvent {
            symbol: symbol.to_string(),
            current_price: stats.current,
            min_price: stats.min,
            avg_price: stats.avg,
            max_price: stats.max,
            profit_margin_pct,
            potential_profit,
            change_from_min_pct: stats.change_from_min_pct,
            change_from_avg_pct: stats.change_from_avg_pct,
            volatility_pct: stats.volatility_pct,
            confidence: self.cfg.confidence_for(profit_margin_pct),
            data_point_count: stats.count,
            detected_at_ms: now_ms,
            market_stat: market_stat.cloned(),
        }
    }
}
