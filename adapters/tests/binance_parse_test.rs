use std::time::Duration;

use adapters::binance::{BinanceClient, BinanceSource, Ticker24h, TickerPrice, parse};
use market::PriceSource;

const PRICES: &str = r#"[
    {"symbol":"BTCUSDT","price":"64250.01000000"},
    {"symbol":"ETHUSDT","price":"3120.55000000"},
    {"symbol":"BADUSDT","price":"not-a-number"},
    {"symbol":"ETHBTC","price":"0.04857000"}
]"#;

const STATS: &str = r#"[
    {
        "symbol":"BTCUSDT","priceChange":"1250.00","priceChangePercent":"1.984",
        "weightedAvgPrice":"63800.1","prevClosePrice":"63000.01","lastPrice":"64250.01",
        "lastQty":"0.01","bidPrice":"64250.00","bidQty":"1.2","askPrice":"64250.02",
        "askQty":"0.8","openPrice":"63000.01","highPrice":"64800.00","lowPrice":"62750.00",
        "volume":"21873.44","quoteVolume":"1395512233.10","openTime":1700000000000,
        "closeTime":1700086399999,"firstId":1,"lastId":1000,"count":1000
    },
    {
        "symbol":"ETHUSDT","priceChange":"-20.0","priceChangePercent":"-0.637",
        "weightedAvgPrice":"3130.0","prevClosePrice":"3140.55","lastPrice":"3120.55",
        "lastQty":"0.5","bidPrice":"3120.54","bidQty":"3.1","askPrice":"3120.56",
        "askQty":"2.0","openPrice":"3140.55","highPrice":"3190.00","lowPrice":"3101.00",
        "volume":"","quoteVolume":"1.0","openTime":1700000000000,
        "closeTime":1700086399999,"firstId":1,"lastId":50,"count":50
    }
]"#;

#[test]
fn price_payload_parses_and_drops_bad_entries() {
    let tickers: Vec<TickerPrice> = serde_json::from_str(PRICES).unwrap();
    let samples = parse::price_samples(&tickers, 1_000, |s| s.ends_with("USDT"));

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].symbol, "BTCUSDT");
    assert!((samples[0].price - 64_250.01).abs() < 1e-9);
    assert!(samples.iter().all(|s| s.observed_at_ms == 1_000));
}

#[test]
fn stats_payload_ignores_unused_fields() {
    let tickers: Vec<Ticker24h> = serde_json::from_str(STATS).unwrap();
    let stats = parse::market_stats(&tickers, |_| true);

    // ETHUSDT has an empty volume and is dropped
    assert_eq!(stats.len(), 1);

    let btc = &stats["BTCUSDT"];
    assert!((btc.volume_24h - 21_873.44).abs() < 1e-9);
    assert!((btc.change_24h_pct - 1.984).abs() < 1e-9);
    assert!((btc.high_24h - 64_800.0).abs() < 1e-9);
    assert_eq!(btc.trade_count_24h, 1_000);
}

#[test]
fn client_trims_trailing_slash() {
    let client = BinanceClient::new("http://localhost:9/", Duration::from_secs(1)).unwrap();
    assert_eq!(client.url(), "http://localhost:9");
}

#[tokio::test]
async fn unreachable_host_surfaces_as_error() {
    let client = BinanceClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let source = BinanceSource::new(client, ["BTCUSDT".to_string()]);

    assert!(source.fetch_prices().await.is_err());
    assert!(source.fetch_market_stats().await.is_err());
}
