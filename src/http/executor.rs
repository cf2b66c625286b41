use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Method, Url, header::USER_AGENT};

use crate::args::{BasicAuth, worker_user_agent};
use crate::error::RequestError;
use crate::load::RunConfig;

/// A round trip that finished within the deadline, whatever its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completed {
    pub status: u16,
    pub response_bytes: u64,
}

pub type RequestResult = Result<Completed, RequestError>;

/// Performs one request-response round trip per call.
///
/// Implementations enforce their own deadline: a call never outlives it.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, worker_id: usize) -> RequestResult;
}

/// Sends the configured request to the target URL with reqwest.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    method: Method,
    url: Url,
    basic_auth: Option<BasicAuth>,
    timeout: Duration,
}

impl HttpExecutor {
    #[must_use]
    pub fn new(client: Client, config: &RunConfig) -> Self {
        Self {
            client,
            method: config.method.as_reqwest(),
            url: config.url.clone(),
            basic_auth: config.basic_auth.clone(),
            timeout: config.request_timeout,
        }
    }

    async fn round_trip(&self, worker_id: usize) -> RequestResult {
        let mut builder = self
            .client
            .request(self.method.clone(), self.url.clone())
            .header(USER_AGENT, worker_user_agent(worker_id));
        if let Some(auth) = self.basic_auth.as_ref() {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = builder
            .send()
            .await
            .map_err(|err| RequestError::from_send(err, self.timeout))?;
        let status = response.status().as_u16();
        let response_bytes = drain_response_body(response)
            .await
            .map_err(|err| RequestError::from_body(err, self.timeout))?;

        Ok(Completed {
            status,
            response_bytes,
        })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, worker_id: usize) -> RequestResult {
        match tokio::time::timeout(self.timeout, self.round_trip(worker_id)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(RequestError::Timeout {
                timeout: self.timeout,
            }),
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
