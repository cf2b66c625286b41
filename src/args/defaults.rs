/// Config filenames checked in the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["massue.toml", "massue.json"];

pub(crate) const DEFAULT_STATSD_PREFIX: &str = "massue";

pub(crate) fn worker_user_agent(worker_id: usize) -> String {
    format!("massue worker:{}", worker_id)
}
