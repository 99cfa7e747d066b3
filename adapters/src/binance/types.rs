//! Wire types for the spot REST endpoints. Binance encodes every decimal as
//! a string; conversion happens in [`super::parse`].

use serde::Deserialize;

/// One entry of `GET /api/v3/ticker/price`.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// One entry of `GET /api/v3/ticker/24hr`. Only the fields we use.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    pub symbol: String,
    pub price_change_percent: String,
    pub high_price: String,
    pub low_price: String,
    pub volume: String,
    pub quote_volume: String,
    pub count: u64,
}
