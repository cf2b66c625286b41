use std::time::Duration;

use url::Url;

use crate::args::{BasicAuth, DEFAULT_STATSD_PREFIX, HttpMethod, LoadArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};

/// Immutable settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub url: Url,
    pub method: HttpMethod,
    pub total_requests: u64,
    pub workers: PositiveUsize,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Progress cadence; the reporter raises zero to one millisecond.
    pub report_interval: Duration,
    /// Exclusive upper bound of each worker's random start delay.
    pub max_stagger: Duration,
    pub basic_auth: Option<BasicAuth>,
    pub statsd: Option<String>,
    pub statsd_prefix: String,
}

impl RunConfig {
    /// Config with the CLI defaults for everything but the target and budget.
    #[must_use]
    pub fn new(url: Url, total_requests: u64, workers: PositiveUsize) -> Self {
        Self {
            url,
            method: HttpMethod::Post,
            total_requests,
            workers,
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            report_interval: Duration::from_secs(1),
            max_stagger: Duration::from_millis(1000),
            basic_auth: None,
            statsd: None,
            statsd_prefix: DEFAULT_STATSD_PREFIX.to_owned(),
        }
    }

    /// Validates parsed arguments and freezes them into a run configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is missing, malformed, has no host, or
    /// uses a scheme other than http/https.
    pub fn from_args(args: &LoadArgs) -> AppResult<Self> {
        let raw_url = args
            .url
            .as_deref()
            .ok_or_else(|| AppError::validation(ValidationError::MissingUrl))?;
        let url = parse_target_url(raw_url)?;

        Ok(Self {
            url,
            method: args.method,
            total_requests: args.requests,
            workers: args.concurrency,
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
            report_interval: args.report_interval,
            max_stagger: args.max_stagger,
            basic_auth: args.basic_auth.clone(),
            statsd: args.statsd.clone(),
            statsd_prefix: args.statsd_prefix.clone(),
        })
    }
}

fn parse_target_url(raw: &str) -> AppResult<Url> {
    let url = Url::parse(raw).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: raw.to_owned(),
            source: err,
        })
    })?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::validation(ValidationError::UnsupportedScheme {
                scheme: other.to_owned(),
            }));
        }
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(url)
}
