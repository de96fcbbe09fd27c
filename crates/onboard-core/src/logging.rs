//! Tracing subscriber setup.
//!
//! The interactive UI owns the terminal, so it logs to a file. Headless
//! commands log to stderr.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, paths};

const DEFAULT_LOG_FILE: &str = "onboard.log";

/// Where log records are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Resolves the log file path for the interactive UI.
pub fn log_file_path(config: &LogConfig) -> PathBuf {
    let name = config.file.as_deref().unwrap_or(DEFAULT_LOG_FILE);
    paths::logs_dir().join(name)
}

fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes buffered file output. Calling this twice is harmless: the second
/// install is ignored.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<Option<WorkerGuard>> {
    let filter = env_filter(config);
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(false)
                .try_init();
            Ok(None)
        }
        LogTarget::File => {
            let path = log_file_path(config);
            let dir = path.parent().map(PathBuf::from).unwrap_or_default();
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .try_init();
            Ok(Some(guard))
        }
    }
}
