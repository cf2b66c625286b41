use std::time::Duration;

use once_cell::sync::OnceCell;
use tokio::time::Instant;

/// Start instant of a run, set by the first request attempt of any worker.
#[derive(Debug, Default)]
pub struct RunClock {
    start: OnceCell<Instant>,
}

impl RunClock {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: OnceCell::new(),
        }
    }

    /// Sets the start instant if no worker has done so yet and returns the
    /// instant that is in effect. Later calls never move it.
    pub fn mark_started(&self) -> Instant {
        *self.start.get_or_init(Instant::now)
    }

    #[must_use]
    pub fn started_at(&self) -> Option<Instant> {
        self.start.get().copied()
    }

    /// Time between the start instant and `now`; zero while unset.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.started_at()
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }
}
