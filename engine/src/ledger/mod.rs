//! Bounded, insertion-ordered record of detection cycles.
//!
//! The ledger is an operational monitor, not an archive: once `max_alerts`
//! is exceeded the oldest alert is dropped, regardless of its content.

pub mod analytics;

use std::collections::VecDeque;

use corelib::{Alert, PumpEvent};
use tracing::debug;

pub use analytics::{AlertSummary, TopPerformer, rank_top_performers};

pub const DEFAULT_MAX_ALERTS: usize = 100;

#[derive(Debug)]
pub struct AlertLedger {
    max_alerts: usize,
    alerts: VecDeque<Alert>,
}

impl AlertLedger {
    pub fn new(max_alerts: usize) -> Self {
        let max_alerts = max_alerts.max(1);
        Self {
            max_alerts,
            alerts: VecDeque::with_capacity(max_alerts.min(1024)),
        }
    }

    /// Appends at the back, then evicts from the front until within bound.
    /// Returns the number of evicted alerts.
    pub fn append(&mut self, alert: Alert) -> usize {
        self.alerts.push_back(alert);

        let mut evicted = 0;
        while self.alerts.len() > self.max_alerts {
            if let Some(old) = self.alerts.pop_front() {
                debug!(alert_id = %old.id, "ledger full; dropped oldest alert");
                evicted += 1;
            }
        }
        evicted
    }

    /// The last `n` alerts, oldest first.
    pub fn recent(&self, n: usize) -> Vec<Alert> {
        let skip = self.alerts.len().saturating_sub(n);
        self.alerts.iter().skip(skip).cloned().collect()
    }

    /// Pumps of the most recent alert, or empty.
    pub fn latest_pumps(&self) -> &[PumpEvent] {
        self.alerts.back().map(|a| a.pumps.as_slice()).unwrap_or(&[])
    }

    pub fn top_performers(&self, limit: usize) -> Vec<TopPerformer> {
        rank_top_performers(&self.alerts, limit)
    }

    pub fn summary(&self) -> AlertSummary {
        AlertSummary {
            total_alerts: self.alerts.len(),
            total_opportunities: self.alerts.iter().map(Alert::pump_count).sum(),
            total_potential_profit: self
                .alerts
                .back()
                .map(|a| a.total_potential_profit)
                .unwrap_or(0.0),
        }
    }

    pub fn reset(&mut self) {
        self.alerts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn max_alerts(&self) -> usize {
        self.max_alerts
    }
}

impl Default for AlertLedger {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ALERTS)
    }
}
