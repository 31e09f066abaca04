//! Periodic sampling loop.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use hostpulse_common::Result;

use crate::proc::ProcReader;
use crate::publisher::ReportPublisher;
use crate::rates::compute_report;

/// Period between counter snapshots.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

/// Run the sampling loop until `shutdown` completes or capture fails.
///
/// Each tick captures a fresh snapshot, converts it against the previous
/// one using the wall-clock time between the two captures, and publishes
/// the resulting report. A failed conversion skips the tick; a failed
/// publish is reported but does not stop the loop. In both cases the fresh
/// snapshot still replaces the previous one so future deltas stay correct.
/// A failed capture is fatal and propagates to the caller for cleanup.
pub async fn run_sampler(
    reader: ProcReader,
    publisher: ReportPublisher,
    interval: Duration,
    shutdown: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(shutdown);

    let mut last = reader.capture()?;
    let mut last_at = Instant::now();

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Received shutdown signal");
                return Ok(());
            }
            _ = tokio::time::sleep(interval) => {}
        }

        let current = reader.capture()?;
        let now = Instant::now();
        let elapsed = now.duration_since(last_at).as_secs_f64();

        match compute_report(&last, &current, elapsed) {
            Ok(utilization) => {
                if let Err(e) = publisher.publish(&utilization).await {
                    warn!(key = %publisher.key(), error = %e, "Failed to publish report");
                }
            }
            Err(e) => {
                warn!(error = %e, "Skipping tick");
            }
        }

        last = current;
        last_at = now;
    }
}
