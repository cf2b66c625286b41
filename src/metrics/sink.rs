use tokio::net::UdpSocket;
use tracing::debug;

use crate::error::{AppError, AppResult, MetricsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failed => "failed",
        }
    }
}

/// Receives one call per finished request attempt.
///
/// Implementations must return promptly and must not fail the attempt.
pub trait OutcomeSink: Send + Sync {
    fn record(&self, outcome: Outcome);
}

/// Discards every outcome.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl OutcomeSink for NoopSink {
    fn record(&self, _outcome: Outcome) {}
}

/// Emits `<prefix>.success:1|c` / `<prefix>.failed:1|c` statsd counters over UDP.
#[derive(Debug)]
pub struct StatsdSink {
    socket: UdpSocket,
    prefix: String,
}

impl StatsdSink {
    /// Resolves `addr` and connects a UDP socket to it.
    ///
    /// # Errors
    ///
    /// Returns an error when the address cannot be resolved or the socket
    /// cannot be bound or connected.
    pub async fn connect(addr: &str, prefix: &str) -> AppResult<Self> {
        let target = tokio::net::lookup_host(addr)
            .await
            .map_err(|err| {
                AppError::metrics(MetricsError::StatsdResolve {
                    addr: addr.to_owned(),
                    source: err,
                })
            })?
            .next()
            .ok_or_else(|| {
                AppError::metrics(MetricsError::StatsdNoAddress {
                    addr: addr.to_owned(),
                })
            })?;

        let bind_addr = if target.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|err| AppError::metrics(MetricsError::StatsdBind { source: err }))?;
        socket.connect(target).await.map_err(|err| {
            AppError::metrics(MetricsError::StatsdConnect {
                addr: addr.to_owned(),
                source: err,
            })
        })?;
        // `try_send` fails until the reactor has reported the socket writable.
        socket.writable().await.map_err(|err| {
            AppError::metrics(MetricsError::StatsdConnect {
                addr: addr.to_owned(),
                source: err,
            })
        })?;

        Ok(Self {
            socket,
            prefix: prefix.to_owned(),
        })
    }

    fn counter_line(&self, outcome: Outcome) -> String {
        if self.prefix.is_empty() {
            format!("{}:1|c", outcome.as_str())
        } else {
            format!("{}.{}:1|c", self.prefix, outcome.as_str())
        }
    }
}

impl OutcomeSink for StatsdSink {
    fn record(&self, outcome: Outcome) {
        let line = self.counter_line(outcome);
        if let Err(err) = self.socket.try_send(line.as_bytes()) {
            debug!("statsd send failed: {}", err);
        }
    }
}
