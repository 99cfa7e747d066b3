use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::pump::PumpEvent;

pub type AlertId = Uuid;

/// All pumps found in one detection cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub created_at_ms: u64,
    pub pumps: Vec<PumpEvent>,
    pub total_potential_profit: f64,
}

impl Alert {
    /// Builds an alert for one cycle. Returns `None` when there is nothing
    /// to report; alerts never hold an empty pump list.
    pub fn from_cycle(pumps: Vec<PumpEvent>, created_at_ms: u64) -> Option<Self> {
        if pumps.is_empty() {
            return None;
        }

        let total_potential_profit = pumps.iter().map(|p| p.potential_profit).sum();

        Some(Self {
            id: Uuid::new_v4(),
            created_at_ms,
            pumps,
            total_potential_profit,
        })
    }

    pub fn pump_count(&self) -> usize {
        self.pumps.len()
    }
}
