use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::shutdown::{ShutdownReceiver, ShutdownSender};

use super::AggregateSnapshot;

const MIN_REPORT_INTERVAL: Duration = Duration::from_millis(1);

/// Anything that can produce a fresh snapshot on demand.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self) -> AggregateSnapshot;
}

/// Prints a progress line every `every` until a shutdown signal arrives.
///
/// The task never prints after the signal, so a summary printed by the caller
/// once the task has been awaited is always the last line. Resolves to the
/// number of lines printed. A zero `every` is raised to one millisecond.
pub fn setup_progress_reporter<S>(
    source: Arc<S>,
    every: Duration,
    shutdown_tx: &ShutdownSender,
) -> tokio::task::JoinHandle<u64>
where
    S: SnapshotSource + ?Sized + 'static,
{
    let mut shutdown_rx: ShutdownReceiver = shutdown_tx.subscribe();
    let period = every.max(MIN_REPORT_INTERVAL);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut printed: u64 = 0;

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                _ = ticker.tick() => {
                    println!("{}", source.snapshot());
                    printed = printed.saturating_add(1);
                }
            }
        }

        printed
    })
}
