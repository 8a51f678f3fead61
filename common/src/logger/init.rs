use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Name of the log file for a given day, e.g. `crypto_tracker_20261016.log`.
pub fn daily_log_file_name(day: NaiveDate) -> String {
    format!("crypto_tracker_{}.log", day.format("%Y%m%d"))
}

/// Installs the global subscriber: console output plus an append-only log file
/// under `log_dir` named after the current UTC day.
///
/// Subsequent calls are no-ops.
pub fn init_logger(service_name: &'static str, log_dir: &Path) -> io::Result<()> {
    LOGGER_INIT.get_or_try_init(|| -> io::Result<()> {
        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(daily_log_file_name(Utc::now().date_naive()));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let console = fmt::layer()
            .with_target(true) // <-- shows crate/module path
            .with_line_number(true);

        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file));

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .with(file_layer)
            .try_init()
            .map_err(io::Error::other)?;

        tracing::info!(
            service = service_name,
            log_file = %log_path.display(),
            "logger initialized"
        );

        Ok(())
    })?;

    Ok(())
}
