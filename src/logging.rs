//! Logging initialization.
//!
//! `init_subscriber` sends tracing output either to stderr or to a daily rolling file
//! in the user's cache directory. Stdout is never used: it carries the MCP transport.
//! Only the first call has any effect.

use directories::ProjectDirs;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Once, OnceLock},
};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// File name prefix of the rolling log
pub const LOG_FILE_PREFIX: &str = "inspect_assert.log";

/// Directory the rolling log is written to, if the platform has a cache dir
pub fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("dev", "inspect_assert", "inspect_assert")
        .map(|proj| proj.cache_dir().join("logs"))
}

/// Filter used when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Initialize the global tracing subscriber.
///
/// * `log_to_file` - write to a rolling daily file under [`log_dir`] instead of stderr
/// * `verbose` - default to `debug` instead of `info`
pub fn init_subscriber(log_to_file: bool, verbose: bool) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

        if log_to_file
            && let Some(dir) = log_dir()
            && let Some(writer) = rolling_writer(&dir)
        {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .init();
            tracing::debug!("Logging to {dir:?} verbose={verbose}");
            return;
        }

        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false)
            .compact()
            .init();
        tracing::debug!("Logging to stderr verbose={verbose}");
    });
}

/// Non-blocking writer into the daily log under `dir`. The worker guard is held in
/// a static so buffered lines are flushed for the life of the process.
fn rolling_writer(dir: &Path) -> Option<NonBlocking> {
    if let Err(e) = fs::create_dir_all(dir) {
        eprintln!("Failed to create log dir {dir:?}, logging to stderr: {e}");
        return None;
    }
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));
    FILE_GUARD.set(guard).ok()?;
    Some(writer)
}
