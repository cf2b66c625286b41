use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BasicAuth, LoadArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies config file values to every option not set on the command line
/// or through its environment variable.
///
/// # Errors
///
/// Returns an error when a config value fails validation.
pub fn apply_config(
    args: &mut LoadArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_explicit(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_explicit(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = requests;
    }

    if !is_explicit(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_explicit(matches, "basic_auth")
        && let Some(value) = config.basic_auth.as_deref()
    {
        let auth = value
            .parse::<BasicAuth>()
            .map_err(|err| AppError::config(ConfigError::InvalidBasicAuth { source: err }))?;
        args.basic_auth = Some(auth);
    }

    if !is_explicit(matches, "statsd")
        && let Some(statsd) = config.statsd.clone()
    {
        args.statsd = Some(statsd);
    }

    if !is_explicit(matches, "statsd_prefix")
        && let Some(prefix) = config.statsd_prefix.clone()
    {
        args.statsd_prefix = prefix;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = ensure_duration(timeout, "timeout")?;
    }

    if !is_explicit(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = ensure_duration(timeout, "connect_timeout")?;
    }

    if !is_explicit(matches, "report_interval")
        && let Some(interval) = config.report_interval.as_ref()
    {
        args.report_interval = ensure_duration(interval, "report_interval")?;
    }

    if !is_explicit(matches, "max_stagger")
        && let Some(stagger) = config.max_stagger.as_ref()
    {
        args.max_stagger = stagger.to_stagger().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "max_stagger".to_owned(),
                source: err,
            })
        })?;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_duration(value: &DurationValue, field: &str) -> AppResult<Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}
