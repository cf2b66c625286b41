use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

use super::{RunClock, WorkerOutcomeCounter};

const NANOS_PER_SEC_X100: u128 = 100_000_000_000;

/// Point-in-time totals of a run. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSnapshot {
    pub success: u64,
    pub failed: u64,
    pub elapsed: Duration,
    /// Requests per second, in hundredths.
    pub rps_x100: u64,
}

impl AggregateSnapshot {
    /// Sums `counters` and derives duration and throughput as of `now`.
    ///
    /// Reports zero duration and zero throughput while the clock is unset.
    #[must_use]
    pub fn from_counters<'counter, I>(counters: I, clock: &RunClock, now: Instant) -> Self
    where
        I: IntoIterator<Item = &'counter WorkerOutcomeCounter>,
    {
        let (success, failed) = counters
            .into_iter()
            .fold((0u64, 0u64), |(success, failed), counter| {
                (
                    success.saturating_add(counter.success()),
                    failed.saturating_add(counter.failed()),
                )
            });
        let elapsed = clock.elapsed_at(now);
        Self {
            success,
            failed,
            elapsed,
            rps_x100: requests_per_second_x100(success.saturating_add(failed), elapsed),
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.success.saturating_add(self.failed)
    }
}

impl fmt::Display for AggregateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "success: {} failed: {} {}req/s, duration: {}",
            self.success,
            self.failed,
            format_x100(self.rps_x100),
            format_duration(self.elapsed)
        )
    }
}

/// Throughput in hundredths of a request per second, rounded to nearest.
#[must_use]
pub fn requests_per_second_x100(requests: u64, elapsed: Duration) -> u64 {
    let nanos = elapsed.as_nanos();
    let scaled = u128::from(requests).saturating_mul(NANOS_PER_SEC_X100);
    scaled
        .saturating_add(nanos / 2)
        .checked_div(nanos)
        .map_or(0, |value| u64::try_from(value).unwrap_or(u64::MAX))
}

/// `"{ms}ms"` below one second, `"{s}.{cs}s"` rounded to hundredths otherwise.
#[must_use]
pub fn format_duration(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        return format!("{}ms", millis);
    }
    let centis = millis.saturating_add(5) / 10;
    format!("{}.{:02}s", centis / 100, centis % 100)
}

#[must_use]
pub fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}
