//! Conversion from wire types to domain models.
//!
//! Entries that fail to parse are dropped individually; one bad ticker never
//! poisons the whole batch.

use corelib::{MarketStat, MarketStats, PriceSample};
use tracing::debug;

use super::errors::BinanceError;
use super::types::{Ticker24h, TickerPrice};

fn decimal(symbol: &str, field: &'static str, raw: &str) -> Result<f64, BinanceError> {
    raw.parse::<f64>().map_err(|source| BinanceError::ParseFloat {
        symbol: symbol.to_string(),
        field,
        source,
    })
}

pub fn price_sample(t: &TickerPrice, observed_at_ms: u64) -> Result<PriceSample, BinanceError> {
    let price = decimal(&t.symbol, "price", &t.price)?;
    Ok(PriceSample::new(t.symbol.clone(), price, observed_at_ms))
}

pub fn market_stat(t: &Ticker24h) -> Result<MarketStat, BinanceError> {
    Ok(MarketStat {
        volume_24h: decimal(&t.symbol, "volume", &t.volume)?,
        quote_volume_24h: decimal(&t.symbol, "quoteVolume", &t.quote_volume)?,
        change_24h_pct: decimal(&t.symbol, "priceChangePercent", &t.price_change_percent)?,
        high_24h: decimal(&t.symbol, "highPrice", &t.high_price)?,
        low_24h: decimal(&t.symbol, "lowPrice", &t.low_price)?,
        trade_count_24h: t.count,
    })
}

/// Every ticker accepted by `keep` becomes a sample stamped `observed_at_ms`.
pub fn price_samples<'a>(
    tickers: impl IntoIterator<Item = &'a TickerPrice>,
    observed_at_ms: u64,
    keep: impl Fn(&str) -> bool,
) -> Vec<PriceSample> {
    tickers
        .into_iter()
        .filter(|t| keep(&t.symbol))
        .filter_map(|t| match price_sample(t, observed_at_ms) {
            Ok(s) => Some(s),
            Err(e) => {
                debug!(error = %e, "dropping ticker price");
                None
            }
        })
        .collect()
}

pub fn market_stats<'a>(
    tickers: impl IntoIterator<Item = &'a Ticker24h>,
    keep: impl Fn(&str) -> bool,
) -> MarketStats {
    tickers
        .into_iter()
        .filter(|t| keep(&t.symbol))
        .filter_map(|t| match market_stat(t) {
            Ok(s) => Some((t.symbol.clone(), s)),
            Err(e) => {
                debug!(error = %e, "dropping 24h ticker");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tp(symbol: &str, price: &str) -> TickerPrice {
        TickerPrice {
            symbol: symbol.into(),
            price: price.into(),
        }
    }

    #[test]
    fn bad_price_names_symbol_and_field() {
        let err = price_sample(&tp("XUSDT", "n/a"), 0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("XUSDT"));
        assert!(msg.contains("price"));
    }

    #[test]
    fn keep_filter_is_applied_before_parsing() {
        let tickers = [tp("AUSDT", "1.5"), tp("BUSDT", "garbage")];
        let out = price_samples(&tickers, 7, |s| s == "AUSDT");

        assert_eq!(out, vec![PriceSample::new("AUSDT", 1.5, 7)]);
    }
}
