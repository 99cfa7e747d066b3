pub mod cli;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use adapters::binance::{BinanceClient, BinanceSource};
use cli::Cli;
use common::{logger::init_logger, time::now_ms};
use market::PriceSource;
use scheduler::{ScannerEngine, spawn_scan_loop};

/// Logs status and the latest live pumps at a fixed cadence.
fn start_status_reporter<S: PriceSource>(engine: Arc<ScannerEngine<S>>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let status = engine.status();
            tracing::info!(
                active = status.active,
                symbols = status.tracked_symbols,
                samples = status.history_size,
                alerts = status.alert_count,
                cycles = status.counters.cycles_run,
                upstream_failures = status.counters.upstream_failures,
                "scanner status"
            );

            let live = engine.live_pumps();
            for p in &live.pumps {
                tracing::info!(
                    symbol = %p.symbol,
                    price = p.current_price,
                    margin_pct = p.profit_margin_pct,
                    confidence = %p.confidence,
                    "live pump"
                );
            }
        }
    });
}

/// Bounded run: `cycles` ticks at the scan interval, then the history is
/// written to stdout.
async fn run_bounded<S: PriceSource>(
    engine: Arc<ScannerEngine<S>>,
    cycles: u32,
    every: Duration,
) -> anyhow::Result<()> {
    let mut ticker = tokio::time::interval(every);

    for _ in 0..cycles {
        ticker.tick().await;
        engine.run_cycle(now_ms()).await;
    }

    let history = engine.history(usize::MAX);
    println!("{}", serde_json::to_string_pretty(&history)?);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let is_production = std::env::var("APP_ENV").unwrap_or_default() == "production";
    init_logger("pump-scanner", cli.json_logs || is_production);

    tracing::info!("Starting pump scanner...");

    let cfg = cli.scanner_config();

    let client = BinanceClient::new(cli.binance_api_url.clone(), cfg.fetch_timeout)?;
    let source = BinanceSource::new(client, cfg.universe.clone());
    let engine = ScannerEngine::new(cfg.clone(), source)?;

    if let Some(cycles) = cli.cycles {
        return run_bounded(engine, cycles, cfg.scan_interval).await;
    }

    engine.start();
    let scan = spawn_scan_loop(Arc::clone(&engine), cfg.scan_interval);
    start_status_reporter(Arc::clone(&engine), cli.report_every());

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");

    engine.stop();
    scan.abort();

    Ok(())
}
