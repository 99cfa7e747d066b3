use std::sync::Arc;

use async_trait::async_trait;
use corelib::{MarketStats, PriceSample};

/// Upstream supplier of price snapshots.
///
/// Implementations own their transport timeouts. Errors are advisory: the
/// scanner treats a failed fetch as an empty batch and carries on.
#[async_trait]
pub trait PriceSource: Send + Sync + 'static {
    /// Latest price for every symbol the source knows about.
    async fn fetch_prices(&self) -> anyhow::Result<Vec<PriceSample>>;

    /// Latest 24h statistics keyed by symbol. May be partial.
    async fn fetch_market_stats(&self) -> anyhow::Result<MarketStats> {
        Ok(MarketStats::new())
    }
}

#[async_trait]
impl<T: PriceSource + ?Sized> PriceSource for Arc<T> {
    async fn fetch_prices(&self) -> anyhow::Result<Vec<PriceSample>> {
        (**self).fetch_prices().await
    }

    async fn fetch_market_stats(&self) -> anyhow::Result<MarketStats> {
        (**self).fetch_market_stats().await
    }
}
