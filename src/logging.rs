//! Tracing setup. Filter comes from `RUST_LOG`, defaulting to `warn`.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr. Used by one-shot CLI commands.
pub fn init_stderr() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter())
        .try_init();
}

/// Log to a file so the terminal UI is not overwritten. Keep the guard alive
/// until exit or buffered lines are lost.
pub fn init_file(path: &Path) -> Option<WorkerGuard> {
    let dir = path.parent()?;
    let name = path.file_name()?;
    if std::fs::create_dir_all(dir).is_err() {
        init_stderr();
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(filter())
        .try_init();
    Some(guard)
}
