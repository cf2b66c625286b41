use tokio::time::Instant;

use crate::args::PositiveUsize;
use crate::metrics::{AggregateSnapshot, RunClock, SnapshotSource, WorkerOutcomeCounter};

/// State shared by the workers, the reporter and the final summary of one run.
///
/// Holds one pre-allocated counter slot per worker, indexed by worker id, and
/// the run clock. Several contexts can coexist in one process.
#[derive(Debug)]
pub struct RunContext {
    clock: RunClock,
    counters: Box<[WorkerOutcomeCounter]>,
}

impl RunContext {
    #[must_use]
    pub fn new(workers: PositiveUsize) -> Self {
        let counters = (0..workers.get())
            .map(|_| WorkerOutcomeCounter::new())
            .collect();
        Self {
            clock: RunClock::new(),
            counters,
        }
    }

    #[must_use]
    pub const fn clock(&self) -> &RunClock {
        &self.clock
    }

    #[must_use]
    pub fn counter(&self, worker_id: usize) -> Option<&WorkerOutcomeCounter> {
        self.counters.get(worker_id)
    }

    #[must_use]
    pub fn counters(&self) -> &[WorkerOutcomeCounter] {
        &self.counters
    }

    #[must_use]
    pub fn snapshot_at(&self, now: Instant) -> AggregateSnapshot {
        AggregateSnapshot::from_counters(self.counters.iter(), &self.clock, now)
    }
}

impl SnapshotSource for RunContext {
    fn snapshot(&self) -> AggregateSnapshot {
        self.snapshot_at(Instant::now())
    }
}
