
use std::time::Duration;

use corelib::Confidence;
use scheduler::{ScannerConfig, ScannerEngine};
use tracing_test::traced_test;

use mock_source::{GatedSource, ScriptedSource, StalledSource};

fn cfg(universe: &[&str]) -> ScannerConfig {
    let mut cfg = ScannerConfig::default();
    cfg.detector.min_profit_margin_pct = 5.0;
    cfg.universe = universe.iter().map(|s| s.to_string()).collect();
    cfg
}

#[tokio::test]
async fn empty_batch_is_a_clean_noop() {
    let engine = ScannerEngine::new(cfg(&[]), ScriptedSource::new()).unwrap();

    let r = engine.run_cycle(1_000).await;

    assert_eq!(r.pumps_found, 0);
    assert!(!r.skipped);
    assert!(r.upstream_error.is_none());
    assert_eq!(engine.history(10).total, 0);
    assert_eq!(engine.status().last_cycle_at_ms, Some(1_000));
}

#[tokio::test]
async fn flat_then_spike_produces_one_alert() {
    let source = ScriptedSource::new();
    for t in [0u64, 1_000, 2_000] {
        source.push_prices(&[("XUSDT", 100.0, t)]).await;
    }
    source.push_prices(&[("XUSDT", 110.0, 3_000)]).await;

    let engine = ScannerEngine::new(cfg(&["XUSDT"]), source).unwrap();

    for t in [0u64, 1_000, 2_000] {
        assert_eq!(engine.run_cycle(t).await.pumps_found, 0);
    }
    let r = engine.run_cycle(3_000).await;

    assert_eq!(r.pumps_found, 1);
    assert!(r.alert_id.is_some());

    let live = engine.live_pumps();
    assert_eq!(live.pumps.len(), 1);
    assert_eq!(live.pumps[0].confidence, Confidence::High);
    assert!((live.pumps[0].potential_profit - 5_000.0).abs() < 1e-6);
    assert_eq!(live.summary.total_alerts, 1);
    assert!((live.summary.total_potential_profit - 5_000.0).abs() < 1e-6);

    let top = engine.top_performers(10);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].symbol, "XUSDT");
}

#[tokio::test]
async fn debounce_suppresses_repeat_within_window() {
    let source = ScriptedSource::new();
    source.push_prices(&[("XUSDT", 100.0, 0)]).await;
    source.push_prices(&[("XUSDT", 110.0, 1_000)]).await;
    source.push_prices(&[("XUSDT", 120.0, 2_000)]).await;
    source.push_prices(&[("XUSDT", 130.0, 40_000)]).await;

    let engine = ScannerEngine::new(cfg(&["XUSDT"]), source).unwrap();

    engine.run_cycle(0).await;
    assert_eq!(engine.run_cycle(1_000).await.pumps_found, 1);
    assert_eq!(engine.run_cycle(2_000).await.pumps_found, 0);
    assert_eq!(engine.run_cycle(40_000).await.pumps_found, 1);

    let status = engine.status();
    assert_eq!(status.alert_count, 2);
    assert_eq!(status.counters.pumps_debounced, 1);
}

#[tokio::test]
async fn reset_clears_history_debounce_and_ledger() {
    let source = ScriptedSource::new();
    source.push_prices(&[("XUSDT", 100.0, 0)]).await;
    source.push_prices(&[("XUSDT", 110.0, 1_000)]).await;
    source.push_prices(&[("XUSDT", 100.0, 2_000)]).await;
    source.push_prices(&[("XUSDT", 110.0, 3_000)]).await;

    let engine = ScannerEngine::new(cfg(&["XUSDT"]), source).unwrap();
    engine.run_cycle(0).await;
    engine.run_cycle(1_000).await;
    assert_eq!(engine.status().alert_count, 1);

    engine.reset().await;

    let status = engine.status();
    assert_eq!(status.tracked_symbols, 0);
    assert_eq!(status.history_size, 0);
    assert_eq!(status.alert_count, 0);
    assert!(engine.live_pumps().pumps.is_empty());
    assert!(engine.window("XUSDT").is_empty());

    // Debounce was cleared too, so the same symbol fires again immediately.
    engine.run_cycle(2_000).await;
    assert_eq!(engine.run_cycle(3_000).await.pumps_found, 1);
}

#[tokio::test]
async fn overlapping_cycle_is_skipped() {
    let source = GatedSource::default();
    let entered = source.entered.clone();
    let release = source.release.clone();

    let engine = ScannerEngine::new(cfg(&[]), source).unwrap();

    let first = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.run_cycle(1_000).await })
    };
    entered.notified().await;

    let second = engine.run_cycle(1_001).await;
    assert!(second.skipped);
    assert_eq!(second.pumps_found, 0);

    release.notify_one();
    let first = first.await.unwrap();
    assert!(!first.skipped);
    assert_eq!(first.samples_accepted, 1);

    let counters = engine.status().counters;
    assert_eq!(counters.cycles_skipped, 1);
    assert_eq!(counters.cycles_run, 1);
}

#[tokio::test]
#[traced_test]
async fn price_failure_reports_upstream_error() {
    let source = ScriptedSource::new();
    source.push_error("connection refused").await;

    let engine = ScannerEngine::new(cfg(&[]), source).unwrap();
    let r = engine.run_cycle(0).await;

    assert_eq!(r.pumps_found, 0);
    assert!(
        r.upstream_error
            .as_deref()
            .is_some_and(|e| e.contains("connection refused"))
    );
    assert_eq!(engine.status().counters.upstream_failures, 1);
    assert_eq!(engine.history(10).total, 0);
    assert!(logs_contain("price fetch failed"));
}

#[tokio::test(start_paused = true)]
async fn stalled_source_times_out() {
    let mut c = cfg(&[]);
    c.fetch_timeout = Duration::from_secs(2);

    let engine = ScannerEngine::new(c, StalledSource).unwrap();
    let r = engine.run_cycle(0).await;

    assert!(
        r.upstream_error
            .as_deref()
            .is_some_and(|e| e.contains("timed out"))
    );
    assert_eq!(engine.status().counters.stats_failures, 0);
}

#[tokio::test]
async fn stats_failure_does_not_block_detection() {
    let source = ScriptedSource::failing_stats();
    source.push_prices(&[("XUSDT", 100.0, 0)]).await;
    source.push_prices(&[("XUSDT", 110.0, 1_000)]).await;

    let engine = ScannerEngine::new(cfg(&["XUSDT"]), source).unwrap();
    engine.run_cycle(0).await;
    let r = engine.run_cycle(1_000).await;

    assert_eq!(r.pumps_found, 1);
    assert!(r.upstream_error.is_none());
    assert!(engine.live_pumps().pumps[0].market_stat.is_none());
    assert_eq!(engine.status().counters.stats_failures, 2);
}

#[tokio::test]
async fn market_stats_feed_top_performer_volume() {
    let source = ScriptedSource::new();
    source.set_volume("XUSDT", 1_000.0).await;
    source.push_prices(&[("XUSDT", 100.0, 0)]).await;
    source.push_prices(&[("XUSDT", 110.0, 1_000)]).await;

    let engine = ScannerEngine::new(cfg(&["XUSDT"]), source).unwrap();
    engine.run_cycle(0).await;
    engine.run_cycle(1_000).await;

    let top = engine.top_performers(5);
    assert_eq!(top.len(), 1);
    assert!((top[0].avg_volume_24h - 1_000.0).abs() < 1e-9);
}

#[tokio::test]
async fn start_and_stop_are_idempotent() {
    let engine = ScannerEngine::new(cfg(&[]), ScriptedSource::new()).unwrap();

    assert!(!engine.is_active());
    assert!(engine.start());
    assert!(!engine.start());
    assert!(engine.is_active());
    assert!(engine.status().active);

    assert!(engine.stop());
    assert!(!engine.stop());
    assert!(!engine.is_active());
}

#[tokio::test]
async fn history_limit_is_clamped_and_oldest_first() {
    let mut c = cfg(&["XUSDT", "YUSDT", "ZUSDT"]);
    c.max_alerts = 2;

    let source = ScriptedSource::new();
    source
        .push_prices(&[("XUSDT", 1.0, 0), ("YUSDT", 1.0, 0), ("ZUSDT", 1.0, 0)])
        .await;
    source.push_prices(&[("XUSDT", 2.0, 1_000)]).await;
    source.push_prices(&[("YUSDT", 2.0, 2_000)]).await;
    source.push_prices(&[("ZUSDT", 2.0, 3_000)]).await;

    let engine = ScannerEngine::new(c, source).unwrap();
    for t in [0u64, 1_000, 2_000, 3_000] {
        engine.run_cycle(t).await;
    }

    let view = engine.history(50);
    assert_eq!(view.total, 2);
    assert_eq!(view.alerts.len(), 2);
    assert_eq!(view.alerts[0].pumps[0].symbol, "YUSDT");
    assert_eq!(view.alerts[1].pumps[0].symbol, "ZUSDT");

    let one = engine.history(1);
    assert_eq!(one.alerts.len(), 1);
    assert_eq!(one.alerts[0].pumps[0].symbol, "ZUSDT");
}

#[tokio::test]
async fn status_reports_universe_and_samples() {
    let source = ScriptedSource::new();
    source
        .push_prices(&[("AUSDT", 1.0, 0), ("BUSDT", 2.0, 0), ("QQQ", 3.0, 0)])
        .await;

    let engine = ScannerEngine::new(cfg(&["AUSDT", "BUSDT"]), source).unwrap();
    engine.run_cycle(0).await;

    let status = engine.status();
    assert_eq!(status.universe_size, 2);
    assert_eq!(status.tracked_symbols, 2);
    assert_eq!(status.history_size, 2);
    assert_eq!(status.counters.samples_outside_universe, 1);
    assert_eq!(status.counters.samples_accepted, 2);
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let mut c = cfg(&[]);
    c.detector.min_profit_margin_pct = 0.0;

    assert!(ScannerEngine::new(c, ScriptedSource::new()).is_err());
}

#[tokio::test(start_paused = true)]
async fn scan_loop_runs_only_while_active() {
    let source = ScriptedSource::new();
    let mut c = cfg(&[]);
    c.scan_interval = Duration::from_secs(5);

    let engine = ScannerEngine::new(c.clone(), source).unwrap();
    let handle = scheduler::spawn_scan_loop(engine.clone(), c.scan_interval);

    tokio::time::sleep(Duration::from_secs(12)).await;
    assert_eq!(engine.status().counters.cycles_run, 0);

    engine.start();
    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(engine.status().counters.cycles_run >= 2);

    handle.abort();
}
