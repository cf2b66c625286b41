use std::time::Duration;

use rand::Rng;

use crate::args::PositiveUsize;

use super::RunConfig;

/// What one worker has to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerAssignment {
    pub worker_id: usize,
    pub share: u64,
    pub delay: Duration,
}

/// Splits `total` into one share per worker.
///
/// Every worker gets `total / workers`; worker 0 additionally takes the whole
/// remainder, so the shares always add up to `total`.
#[must_use]
pub fn plan_shares(total: u64, workers: PositiveUsize) -> Vec<u64> {
    let count = u64::try_from(workers.get()).unwrap_or(u64::MAX);
    let base = total.checked_div(count).unwrap_or(0);
    let remainder = total.checked_rem(count).unwrap_or(0);

    let mut shares = vec![base; workers.get()];
    if let Some(first) = shares.first_mut() {
        *first = base.saturating_add(remainder);
    }
    shares
}

/// Draws an independent start delay in `[0, max_stagger)` per worker, at
/// millisecond granularity. A bound below one millisecond disables the stagger.
#[must_use]
pub fn stagger_delays<R>(workers: PositiveUsize, max_stagger: Duration, rng: &mut R) -> Vec<Duration>
where
    R: Rng + ?Sized,
{
    let max_ms = u64::try_from(max_stagger.as_millis()).unwrap_or(u64::MAX);
    (0..workers.get())
        .map(|_| {
            if max_ms == 0 {
                Duration::ZERO
            } else {
                Duration::from_millis(rng.gen_range(0..max_ms))
            }
        })
        .collect()
}

#[must_use]
pub fn plan_workers<R>(config: &RunConfig, rng: &mut R) -> Vec<WorkerAssignment>
where
    R: Rng + ?Sized,
{
    let shares = plan_shares(config.total_requests, config.workers);
    let delays = stagger_delays(config.workers, config.max_stagger, rng);
    shares
        .into_iter()
        .zip(delays)
        .enumerate()
        .map(|(worker_id, (share, delay))| WorkerAssignment {
            worker_id,
            share,
            delay,
        })
        .collect()
}
