//! Fixed-period scan loop.
//!
//! Single producer: each tick awaits its cycle before the next tick is
//! taken, and missed ticks are skipped rather than bursted.

use std::sync::Arc;
use std::time::Duration;

use common::time::now_ms;
use market::PriceSource;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::engine::ScannerEngine;

/// Spawns the scan loop. Cycles only run while the engine is active; the
/// loop itself keeps ticking so `start()` takes effect on the next tick.
///
/// Abort the returned handle to shut the loop down.
pub fn spawn_scan_loop<S: PriceSource>(
    engine: Arc<ScannerEngine<S>>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(every_ms = period.as_millis() as u64, "scan loop started");

        loop {
            ticker.tick().await;

            if !engine.is_active() {
                debug!("scanner inactive; tick ignored");
                continue;
            }

            let result = engine.run_cycle(now_ms()).await;
            if let Some(err) = &result.upstream_error {
                debug!(error = %err, "cycle ran against an empty batch");
            }
        }
    })
}
