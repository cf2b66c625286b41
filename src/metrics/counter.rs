use std::sync::atomic::{AtomicU64, Ordering};

/// Success/failure tally for one worker.
///
/// Only the owning worker writes to it; readers may load it at any time,
/// including while the worker is still running.
#[derive(Debug, Default)]
pub struct WorkerOutcomeCounter {
    success: AtomicU64,
    failed: AtomicU64,
}

impl WorkerOutcomeCounter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            success: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_success(&self) {
        self.success.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn success(&self) -> u64 {
        self.success.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.success().saturating_add(self.failed())
    }
}
