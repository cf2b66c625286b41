use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::http::RequestExecutor;
use crate::metrics::{Outcome, OutcomeSink, format_duration};

use super::{RunContext, WorkerAssignment};

/// One unit of concurrency: sleeps for its stagger delay, then performs its
/// share of requests strictly one after another.
pub(crate) struct WorkerUnit {
    assignment: WorkerAssignment,
    context: Arc<RunContext>,
    executor: Arc<dyn RequestExecutor>,
    sink: Arc<dyn OutcomeSink>,
}

impl WorkerUnit {
    pub(crate) const fn new(
        assignment: WorkerAssignment,
        context: Arc<RunContext>,
        executor: Arc<dyn RequestExecutor>,
        sink: Arc<dyn OutcomeSink>,
    ) -> Self {
        Self {
            assignment,
            context,
            executor,
            sink,
        }
    }

    /// Runs the worker to completion and returns the number of attempts made.
    pub(crate) async fn run(self) -> u64 {
        let WorkerAssignment {
            worker_id,
            share,
            delay,
        } = self.assignment;

        let Some(counter) = self.context.counter(worker_id) else {
            error!("worker {}: no counter slot, skipping {} requests", worker_id, share);
            return 0;
        };

        info!("worker {}: delaying start for {}", worker_id, format_duration(delay));
        tokio::time::sleep(delay).await;

        for _ in 0..share {
            self.context.clock().mark_started();
            let started = Instant::now();

            match self.executor.execute(worker_id).await {
                Ok(completed) => {
                    counter.record_success();
                    self.sink.record(Outcome::Success);
                    debug!(
                        "worker {}: got {} in {}",
                        worker_id,
                        completed.status,
                        format_duration(started.elapsed())
                    );
                }
                Err(err) => {
                    counter.record_failure();
                    self.sink.record(Outcome::Failed);
                    warn!("worker {}: request failed: {}", worker_id, err);
                }
            }
        }

        info!("worker {} exited", worker_id);
        counter.attempts()
    }
}
