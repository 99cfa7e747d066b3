use std::collections::HashSet;

use async_trait::async_trait;
use common::time::now_ms;
use corelib::{MarketStats, PriceSample, Symbol};
use market::PriceSource;

use super::client::BinanceClient;
use super::parse;

/// [`PriceSource`] backed by the Binance spot REST API.
///
/// When a universe is set, tickers for other symbols are dropped before
/// parsing; the exchange lists a few thousand pairs.
pub struct BinanceSource {
    client: BinanceClient,
    universe: HashSet<Symbol>,
}

impl BinanceSource {
    pub fn new(client: BinanceClient, universe: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            client,
            universe: universe.into_iter().collect(),
        }
    }

    fn keep(&self, symbol: &str) -> bool {
        self.universe.is_empty() || self.universe.contains(symbol)
    }
}

#[async_trait]
impl PriceSource for BinanceSource {
    async fn fetch_prices(&self) -> anyhow::Result<Vec<PriceSample>> {
        let tickers = self.client.ticker_prices().await?;
        Ok(parse::price_samples(&tickers, now_ms(), |s| self.keep(s)))
    }

    async fn fetch_market_stats(&self) -> anyhow::Result<MarketStats> {
        let tickers = self.client.ticker_24h().await?;
        Ok(parse::market_stats(&tickers, |s| self.keep(s)))
    }
}
