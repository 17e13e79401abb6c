//! Diagnostics logging.
//!
//! The terminal belongs to the stopwatch frame, so tracing output goes to a
//! file: `debug_log` from the config, else `$RSPLITWATCH_LOG_DIR`, else the
//! config directory. The filter comes from `RUST_LOG`.

use crate::config::Config;
use crate::utils::path::expand_tilde;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "rsplitwatch.log";

fn log_target(cfg: &Config) -> (PathBuf, String) {
    if let Some(p) = &cfg.debug_log {
        let path = expand_tilde(p);
        let dir = path
            .parent()
            .map(|d| d.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| LOG_FILE_NAME.to_string());
        return (dir, name);
    }
    let dir = std::env::var("RSPLITWATCH_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Config::config_dir());
    (dir, LOG_FILE_NAME.to_string())
}

/// Install the file subscriber. Keep the guard alive until exit so buffered
/// lines get flushed. Returns `None` when the log directory is unusable or a
/// subscriber is already installed; logging is then simply off.
pub fn init(cfg: &Config) -> Option<WorkerGuard> {
    let (dir, name) = log_target(cfg);
    if std::fs::create_dir_all(&dir).is_err() {
        return None;
    }
    let file_appender = tracing_appender::rolling::never(&dir, name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rsplitwatch=info".into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .ok()?;

    Some(guard)
}
