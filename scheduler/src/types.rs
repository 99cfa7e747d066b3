//! Shared types used by the scanner subsystem.

use std::time::Duration;

use corelib::{Alert, AlertId, PumpEvent, Symbol};
use engine::{AlertSummary, ConfigError, DetectorConfig};
use market::HistoryConfig;
use serde::{Deserialize, Serialize};

use crate::metrics::CountersSnapshot;

/// Everything the scanner needs to run. Owned by the caller, validated once.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub detector: DetectorConfig,

    /// Per-symbol window bounds (time + count).
    pub history: HistoryConfig,

    /// Alerts retained in the ledger before FIFO eviction.
    pub max_alerts: usize,

    /// Monitoring universe. Samples for other symbols are ignored.
    /// Empty means "accept every symbol the source reports".
    pub universe: Vec<Symbol>,

    /// Upper bound on each upstream fetch.
    pub fetch_timeout: Duration,

    /// Period of the scan loop.
    pub scan_interval: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            history: HistoryConfig::default(),
            max_alerts: engine::ledger::DEFAULT_MAX_ALERTS,
            universe: Vec::new(),
            fetch_timeout: Duration::from_secs(10),
            scan_interval: Duration::from_secs(5),
        }
    }
}

impl ScannerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detector.validate()?;

        if self.history.window_ms == 0 {
            return Err(ConfigError::Zero("window duration"));
        }
        if self.history.max_points < 2 {
            return Err(ConfigError::MaxPointsTooSmall(self.history.max_points));
        }
        if self.max_alerts == 0 {
            return Err(ConfigError::Zero("max alerts"));
        }
        if self.fetch_timeout.is_zero() {
            return Err(ConfigError::Zero("fetch timeout"));
        }
        if self.scan_interval.is_zero() {
            return Err(ConfigError::Zero("scan interval"));
        }

        Ok(())
    }
}

/// Result of one detection cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    pub pumps_found: usize,

    /// Another cycle was in flight; nothing was done.
    pub skipped: bool,

    pub samples_accepted: usize,

    /// Id of the alert appended this cycle, if any.
    pub alert_id: Option<AlertId>,

    /// Description of a failed price fetch. The cycle still completes as a
    /// no-op; this is informational only.
    pub upstream_error: Option<String>,
}

impl CycleResult {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }
}

/// Current live pumps plus ledger summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LivePumpsView {
    pub pumps: Vec<PumpEvent>,
    pub summary: AlertSummary,
}

/// Bounded slice of the alert history, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryView {
    pub alerts: Vec<Alert>,
    /// Alerts currently retained (may exceed `alerts.len()`).
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusView {
    pub active: bool,
    pub tracked_symbols: usize,
    /// Samples held across all windows.
    pub history_size: usize,
    pub alert_count: usize,
    pub universe_size: usize,
    pub last_cycle_at_ms: Option<u64>,
    pub counters: CountersSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ScannerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_degenerate_bounds() {
        let mut cfg = ScannerConfig::default();
        cfg.history.max_points = 1;
        assert_eq!(cfg.validate(), Err(ConfigError::MaxPointsTooSmall(1)));

        let mut cfg = ScannerConfig::default();
        cfg.history.window_ms = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::Zero("window duration")));

        let cfg = ScannerConfig {
            max_alerts: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::Zero("max alerts")));

        let cfg = ScannerConfig {
            fetch_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn detector_errors_propagate() {
        let mut cfg = ScannerConfig::default();
        cfg.detector.capital = -1.0;
        assert_eq!(cfg.validate(), Err(ConfigError::NonPositiveCapital(-1.0)));
    }
}
