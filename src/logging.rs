use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "COTYPE_LOG";
pub const LOG_FILE_ENV: &str = "COTYPE_LOG_FILE";

/// Where to log, if anywhere: the CLI flag wins over the environment.
pub fn log_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
}

/// Install a file subscriber. The terminal belongs to the UI, so nothing
/// is logged unless a file was asked for. Keep the guard alive for the
/// lifetime of the program so buffered lines get flushed.
pub fn init(path: &Path) -> Result<Option<WorkerGuard>> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .context("log path has no file name")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .try_init()
    {
        Ok(()) => Ok(Some(guard)),
        // already installed (tests); drop the guard so the writer shuts down
        Err(_) => Ok(None),
    }
}
