use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::http::{HttpExecutor, RequestExecutor, build_client};
use crate::metrics::{AggregateSnapshot, NoopSink, OutcomeSink, StatsdSink, setup_progress_reporter};
use crate::shutdown::shutdown_channel;

use super::worker::WorkerUnit;
use super::{RunConfig, RunContext, plan_workers};

/// Final per-worker tallies, indexed by worker id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerTotals {
    pub success: u64,
    pub failed: u64,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Totals taken at the instant the last worker was joined.
    pub snapshot: AggregateSnapshot,
    pub workers: Vec<WorkerTotals>,
    /// Number of progress lines the reporter printed.
    pub progress_lines: u64,
}

/// Splits the request budget across workers, runs them to completion with a
/// progress reporter alongside, and returns the final totals.
///
/// The reporter is stopped and awaited before returning, so nothing else is
/// printed after the caller prints the summary.
///
/// # Errors
///
/// Returns an error when a worker task panics or is cancelled. All workers are
/// joined and the reporter is stopped before the error is returned.
pub async fn run_load(
    config: &RunConfig,
    executor: &Arc<dyn RequestExecutor>,
    sink: &Arc<dyn OutcomeSink>,
) -> AppResult<RunReport> {
    let context = Arc::new(RunContext::new(config.workers));
    let assignments = plan_workers(config, &mut rand::thread_rng());
    info!(
        "running {} requests against {} with {} workers",
        config.total_requests,
        config.url,
        config.workers.get()
    );

    let mut handles = Vec::with_capacity(assignments.len());
    for assignment in assignments {
        let worker = WorkerUnit::new(
            assignment,
            Arc::clone(&context),
            Arc::clone(executor),
            Arc::clone(sink),
        );
        handles.push(tokio::spawn(worker.run()));
    }

    let shutdown_tx = shutdown_channel();
    let reporter = setup_progress_reporter(
        Arc::clone(&context),
        config.report_interval,
        &shutdown_tx,
    );

    let mut first_error = None;
    for handle in handles {
        match handle.await {
            Ok(attempts) => debug!("worker joined after {} attempts", attempts),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    let finished_at = Instant::now();

    // The reporter may already be gone if it panicked; the join below reports that.
    drop(shutdown_tx.send(()));
    let reporter_result = reporter.await;

    if let Some(err) = first_error {
        return Err(err.into());
    }
    let progress_lines = reporter_result?;

    let workers = context
        .counters()
        .iter()
        .map(|counter| WorkerTotals {
            success: counter.success(),
            failed: counter.failed(),
        })
        .collect();

    Ok(RunReport {
        snapshot: context.snapshot_at(finished_at),
        workers,
        progress_lines,
    })
}

/// Runs `config` against its real HTTP target, emitting to statsd when an
/// address is configured.
///
/// # Errors
///
/// Returns an error when the statsd socket cannot be set up, the HTTP client
/// cannot be built, or a worker task fails.
pub async fn run_http_load(config: &RunConfig) -> AppResult<RunReport> {
    let sink: Arc<dyn OutcomeSink> = match config.statsd.as_deref() {
        Some(addr) => {
            let sink = StatsdSink::connect(addr, &config.statsd_prefix).await?;
            info!("sending statsd counters to {}", addr);
            Arc::new(sink)
        }
        None => Arc::new(NoopSink),
    };

    let client = build_client(config)?;
    let executor: Arc<dyn RequestExecutor> = Arc::new(HttpExecutor::new(client, config));

    run_load(config, &executor, &sink).await
}
