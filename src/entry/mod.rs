use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::args::{DEFAULT_CONFIG_FILES, LoadArgs};
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use crate::load::{RunConfig, run_http_load};

/// Parses the command line, runs the load test and prints the summary.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, when the statsd
/// sink or HTTP client cannot be set up, or when the runtime fails. Failed
/// requests are not errors.
pub fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let config = resolve_config(args, &matches)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let report = runtime.block_on(run_http_load(&config))?;
    info!(
        "finished {} of {} requests",
        report.snapshot.total(),
        config.total_requests
    );
    println!("{}", report.snapshot);
    Ok(())
}

fn parse_args() -> AppResult<Option<(LoadArgs, ArgMatches)>> {
    let mut cmd = LoadArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = LoadArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn resolve_config(mut args: LoadArgs, matches: &ArgMatches) -> AppResult<RunConfig> {
    if let Some(file) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &file)?;
    }
    RunConfig::from_args(&args).inspect_err(|err| tracing::error!("{}", err))
}
