//! Pump detection over a single symbol's price window.

pub mod debounce;
pub mod detector;
pub mod stats;

pub use debounce::DebounceState;
pub use detector::{Assessment, PumpDetector};
pub use stats::WindowStats;
