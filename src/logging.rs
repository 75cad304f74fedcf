use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Sends `tracing` output to `<dir>/<file_name>` instead of the terminal, which is busy
/// drawing the maze. Filtering follows `RUST_LOG` and defaults to `info`.
///
/// Keep the returned guard alive until exit so buffered lines get flushed.
pub fn init_file_logging(dir: &str, file_name: &str) -> WorkerGuard {
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed (e.g. by a test harness); that is fine
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
    guard
}
