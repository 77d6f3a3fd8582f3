use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::utils::{self, Profile};

pub const LOG_FILE_NAME: &str = "multitag.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Could not determine data directory for the log file")]
    NoDataDir,
    #[error("Failed to open log file: {0}")]
    IoError(#[from] io::Error),
    #[error("Failed to install log subscriber: {0}")]
    InitError(String),
}

/// Default log file location for a profile
pub fn log_file_path(profile: Profile) -> Result<PathBuf, LoggingError> {
    utils::get_data_dir(profile)
        .map(|dir| dir.join(LOG_FILE_NAME))
        .ok_or(LoggingError::NoDataDir)
}

/// Send tracing output to `log_file`. The terminal belongs to the TUI, so
/// nothing is written to stdout or stderr.
/// The filter comes from `RUST_LOG`, defaulting to `multitag=info`.
pub fn init_file_logging(log_file: &Path) -> Result<(), LoggingError> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("multitag=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::InitError(e.to_string()))?;

    tracing::info!(path = %log_file.display(), "logging initialized");
    Ok(())
}
