pub mod engine;
pub mod metrics;
pub mod runner;
pub mod scanner;
pub mod state;
pub mod types;

pub use engine::ScannerEngine;
pub use metrics::{Counters, CountersSnapshot};
pub use runner::spawn_scan_loop;
pub use scanner::{FetchedBatch, Scanner};
pub use state::ScanState;
pub use types::{CycleResult, HistoryView, LivePumpsView, ScannerConfig, StatusView};
