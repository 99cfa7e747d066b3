use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::errors::BinanceError;
use super::types::{Ticker24h, TickerPrice};

#[derive(Clone)]
pub struct BinanceClient {
    http: Client,
    url: String,
}

impl BinanceClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, BinanceError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        let url = url.into().trim_end_matches('/').to_string();
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last price for every listed symbol.
    #[instrument(skip(self), level = "debug")]
    pub async fn ticker_prices(&self) -> Result<Vec<TickerPrice>, BinanceError> {
        let tickers: Vec<TickerPrice> = self.get("/api/v3/ticker/price").await?;
        debug!(count = tickers.len(), "ticker prices fetched");
        Ok(tickers)
    }

    /// Rolling 24h statistics for every listed symbol.
    #[instrument(skip(self), level = "debug")]
    pub async fn ticker_24h(&self) -> Result<Vec<Ticker24h>, BinanceError> {
        let tickers: Vec<Ticker24h> = self.get("/api/v3/ticker/24hr").await?;
        debug!(count = tickers.len(), "24h tickers fetched");
        Ok(tickers)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BinanceError> {
        let url = format!("{}{}", self.url, path);

        let body = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}
