//! Structured logging to a file under the linkboot home.
//!
//! Terminal output belongs to the renderer, so logs never go to stdout.
//! Verbosity is controlled by `LINKBOOT_LOG` (an `EnvFilter` directive,
//! `info` when unset).

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LINKBOOT_LOG";
pub const LOG_FILE: &str = "linkboot.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `dir/linkboot.log`.
///
/// Returns the appender guard; keep it alive until exit so buffered lines
/// are flushed. Returns `None` when the directory can't be created or a
/// subscriber is already installed, in which case logging stays off.
pub fn init(dir: &Path) -> Option<WorkerGuard> {
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .ok()?;

    Some(guard)
}
