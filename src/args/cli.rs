use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_basic_auth, parse_bool_env, parse_duration_arg, parse_positive_usize,
    parse_request_count, parse_stagger_arg,
};
use super::types::{BasicAuth, HttpMethod, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Fixed-budget HTTP load generator - splits a request budget across staggered concurrent workers and reports live throughput."
)]
pub struct LoadArgs {
    /// Target URL
    #[arg(long, short, env = "MASSUE_URL")]
    pub url: Option<String>,

    /// Total number of requests to perform
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "1",
        env = "MASSUE_REQUESTS",
        value_parser = parse_request_count
    )]
    pub requests: u64,

    /// Number of parallel workers
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "1",
        env = "MASSUE_CONCURRENCY",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "post", ignore_case = true)]
    pub method: HttpMethod,

    /// Basic authentication as a colon separated username and password
    #[arg(
        long = "basic-auth",
        short = 'A',
        env = "MASSUE_BASIC_AUTH",
        value_parser = parse_basic_auth
    )]
    pub basic_auth: Option<BasicAuth>,

    /// Statsd server (host:port) receiving success/failed counters
    #[arg(long = "statsd", short = 'S', env = "MASSUE_STATSD")]
    pub statsd: Option<String>,

    /// Prefix for statsd counter names
    #[arg(long = "statsd-prefix", default_value = super::DEFAULT_STATSD_PREFIX)]
    pub statsd_prefix: String,

    /// Per-request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = "10s", value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Interval between progress lines (supports ms/s/m/h)
    #[arg(
        long = "report-interval",
        default_value = "1s",
        value_parser = parse_duration_arg
    )]
    pub report_interval: Duration,

    /// Upper bound for the random per-worker start delay; 0 disables it
    #[arg(
        long = "max-stagger",
        default_value = "1000ms",
        value_parser = parse_stagger_arg
    )]
    pub max_stagger: Duration,

    /// Path to config file (TOML/JSON). Defaults to ./massue.toml or ./massue.json if present.
    #[arg(long, env = "MASSUE_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose logging (per-request traces; overridden by MASSUE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
