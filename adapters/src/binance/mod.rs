pub mod client;
pub mod errors;
pub mod parse;
pub mod provider;
pub mod types;

pub use client::BinanceClient;
pub use errors::BinanceError;
pub use provider::BinanceSource;
pub use types::*;

/// Public spot API.
pub const DEFAULT_API_URL: &str = "https://api.binance.com";
