pub mod config;
pub mod error;
pub mod ledger;
pub mod pump;

pub use config::DetectorConfig;
pub use error::ConfigError;
pub use ledger::{AlertLedger, AlertSummary, TopPerformer};
pub use pump::{Assessment, DebounceState, PumpDetector, WindowStats};
