//! Tracing subscriber setup for the server binary.
//!
//! Human-readable events go to stdout. When a log directory is configured,
//! the same events are also written as JSON to a daily-rolling file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Base name of the rolling log files
const LOG_FILE_PREFIX: &str = "locallibrary.log";

/// Returns the filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "locallibrary=debug,tower_http=debug"
    } else {
        "locallibrary=info,tower_http=info"
    }
}

/// Installs the global tracing subscriber
///
/// The returned guard flushes the file writer when dropped, so the caller
/// must keep it alive for as long as the process logs.
///
/// ### Errors
///
/// Returns an error if the log directory cannot be created or a global
/// subscriber is already installed
pub fn init_tracing(debug: bool, log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().json().with_writer(writer)), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
