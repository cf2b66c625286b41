use std::time::Duration;

use thiserror::Error;

/// Why a single request attempt failed.
///
/// Every variant counts as one failed attempt; the variant only exists so the
/// cause can be logged.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("no response within {timeout:?}")]
    Timeout { timeout: Duration },
    #[error("connection failed: {source}")]
    Connect {
        #[source]
        source: reqwest::Error,
    },
    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response body: {source}")]
    Body {
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    pub(crate) fn from_send(source: reqwest::Error, timeout: Duration) -> Self {
        if source.is_timeout() {
            RequestError::Timeout { timeout }
        } else if source.is_connect() {
            RequestError::Connect { source }
        } else {
            RequestError::Transport { source }
        }
    }

    pub(crate) fn from_body(source: reqwest::Error, timeout: Duration) -> Self {
        if source.is_timeout() {
            RequestError::Timeout { timeout }
        } else {
            RequestError::Body { source }
        }
    }

    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, RequestError::Timeout { .. })
    }
}
