//! File logging setup. The terminal belongs to the UI, so logs go to disk.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use stardust_config::{Config, LogConfig};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "stardust.log";

/// Where the log file goes: the configured path, else the platform data dir.
pub fn log_path(config: &LogConfig) -> Option<PathBuf> {
    config.file.clone().or_else(|| {
        Config::project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE_NAME))
    })
}

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global subscriber. Returns the log path when logging is active.
///
/// If the file cannot be created logging stays off; the animation does not
/// depend on it.
pub fn init_logging(config: &LogConfig) -> Option<PathBuf> {
    let path = log_path(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = File::create(&path).ok()?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(file_layer)
        .try_init()
        .ok()?;

    Some(path)
}
