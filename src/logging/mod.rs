//! Tracing setup: rolling log file, plus stderr when the terminal is not taken by the TUI.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for the given base level; `verbose` forces debug for this crate.
pub fn filter_directive(level: &str, verbose: bool) -> String {
    let level = if verbose { "debug" } else { level };
    format!("runpad={level},warn")
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines reach the file.
pub fn init(log_dir: &Path, level: &str, verbose: bool, to_stderr: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory '{}'", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "runpad.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let directive = filter_directive(level, verbose);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_filter(EnvFilter::new(&directive));

    let stderr_layer = to_stderr.then(|| {
        let level = if verbose { "runpad=debug,warn" } else { "runpad=warn,error" };
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(EnvFilter::new(level))
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
