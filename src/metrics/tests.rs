use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::time::Instant;

use super::*;
use crate::error::{AppError, AppResult, MetricsError};
use crate::shutdown::shutdown_channel;

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: std::future::Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

#[test]
fn counter_tracks_both_outcomes() -> Result<(), String> {
    let counter = WorkerOutcomeCounter::new();
    counter.record_success();
    counter.record_success();
    counter.record_failure();
    if counter.success() != 2 || counter.failed() != 1 || counter.attempts() != 3 {
        return Err(format!(
            "Unexpected counts: success={} failed={}",
            counter.success(),
            counter.failed()
        ));
    }
    Ok(())
}

#[test]
fn clock_start_is_set_once() -> Result<(), String> {
    let clock = RunClock::new();
    if clock.started_at().is_some() {
        return Err("Clock should start unset".to_owned());
    }
    let first = clock.mark_started();
    std::thread::sleep(Duration::from_millis(5));
    let second = clock.mark_started();
    if first != second {
        return Err("Second mark_started moved the start instant".to_owned());
    }
    if clock.started_at() != Some(first) {
        return Err("started_at disagrees with mark_started".to_owned());
    }
    Ok(())
}

#[test]
fn clock_first_write_wins_across_threads() -> Result<(), String> {
    let clock = Arc::new(RunClock::new());
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let clock = Arc::clone(&clock);
            std::thread::spawn(move || clock.mark_started())
        })
        .collect();
    let mut seen = Vec::with_capacity(handles.len());
    for handle in handles {
        seen.push(
            handle
                .join()
                .map_err(|_err| "clock thread panicked".to_owned())?,
        );
    }
    let start = clock
        .started_at()
        .ok_or_else(|| "Clock should be set".to_owned())?;
    if seen.iter().any(|instant| *instant != start) {
        return Err("Threads observed different start instants".to_owned());
    }
    Ok(())
}

#[test]
fn snapshot_before_start_reports_zero() -> Result<(), String> {
    let clock = RunClock::new();
    let counters = [WorkerOutcomeCounter::new(), WorkerOutcomeCounter::new()];
    let snapshot = AggregateSnapshot::from_counters(&counters, &clock, Instant::now());
    if snapshot.rps_x100 != 0 || snapshot.elapsed != Duration::ZERO || snapshot.total() != 0 {
        return Err(format!("Unexpected snapshot: {:?}", snapshot));
    }
    if snapshot.to_string() != "success: 0 failed: 0 0.00req/s, duration: 0ms" {
        return Err(format!("Unexpected line: {}", snapshot));
    }
    Ok(())
}

#[test]
fn snapshot_sums_all_counters() -> Result<(), String> {
    let clock = RunClock::new();
    let start = clock.mark_started();
    let counters = [
        WorkerOutcomeCounter::new(),
        WorkerOutcomeCounter::new(),
        WorkerOutcomeCounter::new(),
    ];
    for (index, counter) in counters.iter().enumerate() {
        for _ in 0..=index {
            counter.record_success();
        }
        counter.record_failure();
    }

    let snapshot =
        AggregateSnapshot::from_counters(&counters, &clock, start + Duration::from_secs(2));
    if snapshot.success != 6 || snapshot.failed != 3 {
        return Err(format!("Unexpected totals: {:?}", snapshot));
    }
    if snapshot.rps_x100 != 450 {
        return Err(format!("Expected 4.50 req/s, got {}", snapshot.rps_x100));
    }
    if snapshot.to_string() != "success: 6 failed: 3 4.50req/s, duration: 2.00s" {
        return Err(format!("Unexpected line: {}", snapshot));
    }
    Ok(())
}

#[test]
fn throughput_rounds_to_hundredths() -> Result<(), String> {
    let cases = [
        (0, Duration::from_secs(1), 0),
        (10, Duration::ZERO, 0),
        (1, Duration::from_secs(3), 33),
        (2, Duration::from_secs(3), 67),
        (100, Duration::from_millis(80), 125_000),
    ];
    for (requests, elapsed, expected) in cases {
        let actual = requests_per_second_x100(requests, elapsed);
        if actual != expected {
            return Err(format!(
                "requests={} elapsed={:?}: expected {}, got {}",
                requests, elapsed, expected, actual
            ));
        }
    }
    Ok(())
}

#[test]
fn duration_formatting() -> Result<(), String> {
    let cases = [
        (Duration::ZERO, "0ms"),
        (Duration::from_micros(1500), "1ms"),
        (Duration::from_millis(999), "999ms"),
        (Duration::from_millis(1000), "1.00s"),
        (Duration::from_millis(1234), "1.23s"),
        (Duration::from_millis(1996), "2.00s"),
        (Duration::from_secs(75), "75.00s"),
    ];
    for (elapsed, expected) in cases {
        let actual = format_duration(elapsed);
        if actual != expected {
            return Err(format!("{:?}: expected {}, got {}", elapsed, expected, actual));
        }
    }
    Ok(())
}

struct TickingSource {
    calls: AtomicU64,
}

impl SnapshotSource for TickingSource {
    fn snapshot(&self) -> AggregateSnapshot {
        self.calls.fetch_add(1, Ordering::Relaxed);
        AggregateSnapshot::from_counters(
            std::iter::empty::<&WorkerOutcomeCounter>(),
            &RunClock::new(),
            Instant::now(),
        )
    }
}

#[test]
fn reporter_ticks_until_stopped() -> Result<(), String> {
    run_async_test(async {
        let source = Arc::new(TickingSource {
            calls: AtomicU64::new(0),
        });
        let shutdown_tx = shutdown_channel();
        let handle = setup_progress_reporter(
            Arc::clone(&source),
            Duration::from_millis(10),
            &shutdown_tx,
        );

        tokio::time::sleep(Duration::from_millis(60)).await;
        drop(shutdown_tx.send(()));
        let printed = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .map_err(|_err| "Reporter did not stop".to_owned())?
            .map_err(|err| format!("Reporter task failed: {}", err))?;

        if printed < 2 {
            return Err(format!("Expected several progress lines, got {}", printed));
        }
        let calls_after_stop = source.calls.load(Ordering::Relaxed);
        if calls_after_stop != printed {
            return Err("Every snapshot should be printed exactly once".to_owned());
        }
        tokio::time::sleep(Duration::from_millis(30)).await;
        if source.calls.load(Ordering::Relaxed) != calls_after_stop {
            return Err("Reporter kept running after stop".to_owned());
        }
        Ok(())
    })
}

fn run_statsd_test<F>(future: F) -> AppResult<()>
where
    F: std::future::Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}

async fn receive_lines(receiver: &tokio::net::UdpSocket, count: usize) -> AppResult<Vec<String>> {
    let mut lines = Vec::with_capacity(count);
    let mut buffer = [0u8; 256];
    for _ in 0..count {
        let len = tokio::time::timeout(Duration::from_secs(2), receiver.recv(&mut buffer))
            .await
            .map_err(|_err| AppError::metrics(format!("received {} of {} datagrams", lines.len(), count)))??;
        let payload = buffer
            .get(..len)
            .ok_or_else(|| AppError::metrics("datagram length out of range"))?;
        lines.push(String::from_utf8_lossy(payload).into_owned());
    }
    Ok(lines)
}

#[test]
fn statsd_sink_emits_counter_lines() -> AppResult<()> {
    run_statsd_test(async {
        let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await?;
        let addr = receiver.local_addr()?;

        let sink = StatsdSink::connect(&addr.to_string(), "massue").await?;
        sink.record(Outcome::Success);
        sink.record(Outcome::Failed);

        let lines = receive_lines(&receiver, 2).await?;
        if lines != ["massue.success:1|c", "massue.failed:1|c"] {
            return Err(AppError::metrics(format!("Unexpected statsd lines: {:?}", lines)));
        }
        Ok(())
    })
}

#[test]
fn statsd_sink_delivers_outcomes_recorded_right_after_connect() -> AppResult<()> {
    run_statsd_test(async {
        let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await?;
        let addr = receiver.local_addr()?;

        let sink = StatsdSink::connect(&addr.to_string(), "burst").await?;
        for _ in 0..5 {
            sink.record(Outcome::Success);
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        for _ in 0..5 {
            sink.record(Outcome::Failed);
        }

        let lines = receive_lines(&receiver, 10).await?;
        let successes = lines.iter().filter(|line| *line == "burst.success:1|c").count();
        let failures = lines.iter().filter(|line| *line == "burst.failed:1|c").count();
        if successes != 5 || failures != 5 {
            return Err(AppError::metrics(format!("Unexpected statsd lines: {:?}", lines)));
        }
        Ok(())
    })
}

#[test]
fn statsd_sink_without_prefix_uses_bare_names() -> AppResult<()> {
    run_statsd_test(async {
        let receiver = tokio::net::UdpSocket::bind("127.0.0.1:0").await?;
        let addr = receiver.local_addr()?;

        let sink = StatsdSink::connect(&addr.to_string(), "").await?;
        sink.record(Outcome::Success);

        let lines = receive_lines(&receiver, 1).await?;
        if lines != ["success:1|c"] {
            return Err(AppError::metrics(format!("Unexpected statsd lines: {:?}", lines)));
        }
        Ok(())
    })
}

#[test]
fn statsd_sink_rejects_bad_address() -> AppResult<()> {
    run_statsd_test(async {
        match StatsdSink::connect("localhost-without-port", "massue").await {
            Err(AppError::Metrics(MetricsError::StatsdResolve { .. })) => Ok(()),
            Err(err) => Err(AppError::metrics(format!("Unexpected error: {}", err))),
            Ok(_) => Err(AppError::metrics("Expected address without port to fail")),
        }
    })
}

#[test]
fn noop_sink_accepts_everything() -> Result<(), String> {
    let sink: Arc<dyn OutcomeSink> = Arc::new(NoopSink);
    sink.record(Outcome::Success);
    sink.record(Outcome::Failed);
    if Outcome::Failed.as_str() != "failed" || Outcome::Success.as_str() != "success" {
        return Err("Unexpected outcome names".to_owned());
    }
    Ok(())
}
