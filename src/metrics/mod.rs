//! Outcome counters, the run clock, and throughput snapshots with their
//! emitters (console reporter and outcome sinks).
mod clock;
mod counter;
mod reporter;
mod sink;
mod snapshot;

#[cfg(test)]
mod tests;

pub use clock::RunClock;
pub use counter::WorkerOutcomeCounter;
pub use reporter::{SnapshotSource, setup_progress_reporter};
pub use sink::{NoopSink, Outcome, OutcomeSink, StatsdSink};
pub use snapshot::{AggregateSnapshot, format_duration, format_x100, requests_per_second_x100};
