//! File logging
//!
//! The terminal belongs to the dashboard, so logs go to a daily rolling file.
use std::fs;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::FmtSubscriber;

use crate::config::LogSettings;

const LOG_FILE_PREFIX: &str = "avatar-dash.log";

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(settings: &LogSettings) -> Result<WorkerGuard> {
    let dir = settings.dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(settings.level))
        .with_writer(writer)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Could not install the log subscriber")?;

    Ok(guard)
}
