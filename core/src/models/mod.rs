pub mod alert;
pub mod price;
pub mod pump;

pub use alert::{Alert, AlertId};
pub use price::{MarketStat, MarketStats, PriceSample, Symbol};
pub use pump::{Confidence, PumpEvent};
