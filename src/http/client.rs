use reqwest::Client;
use tracing::error;

use crate::error::{AppError, AppResult, HttpError};
use crate::load::RunConfig;

/// Builds the shared HTTP client used by every worker.
///
/// # Errors
///
/// Returns an error when the client cannot be built (for example when the
/// TLS backend fails to initialize).
pub fn build_client(config: &RunConfig) -> AppResult<Client> {
    let builder = Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(config.workers.get());

    match builder.build() {
        Ok(client) => Ok(client),
        Err(err) => {
            error!("Failed to build HTTP client: {}", err);
            Err(AppError::http(HttpError::BuildClientFailed { source: err }))
        }
    }
}
