pub mod history;
pub mod rolling_window;
pub mod source;

pub use history::{HistoryConfig, HistoryStore};
pub use rolling_window::SymbolWindow;
pub use source::PriceSource;
