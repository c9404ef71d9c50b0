//! File logging bootstrap.
//!
//! The terminal runs in raw mode on the alternate screen, so log output goes
//! to rotating files under the configured directory instead of stderr.
//!
//! # Invariants
//! - Initialization is idempotent for the same directory and level.
//! - Re-initialization with a different directory or level is rejected.

use crate::error::{AppError, AppResult};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "taskdeck";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    logger: LoggerHandle,
}

pub fn init_logging(level: &str, log_dir: &Path) -> AppResult<()> {
    let level = normalize_level(level).map_err(AppError::Logging)?;
    if !log_dir.is_absolute() {
        return Err(AppError::Logging(format!(
            "log_dir must be an absolute path, got `{}`",
            log_dir.display()
        )));
    }

    let state = LOGGING_STATE.get_or_try_init(|| -> AppResult<LoggingState> {
        std::fs::create_dir_all(log_dir).map_err(|err| {
            AppError::Logging(format!(
                "failed to create log directory `{}`: {err}",
                log_dir.display()
            ))
        })?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| AppError::Logging(format!("invalid log level `{level}`: {err}")))?
            .log_to_file(
                FileSpec::default()
                    .directory(log_dir)
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| AppError::Logging(format!("failed to start logger: {err}")))?;

        info!(
            "event=app_start module=logging status=ok version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.to_path_buf(),
            logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(AppError::Logging(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        )));
    }
    if state.level != level {
        return Err(AppError::Logging(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        )));
    }
    Ok(())
}

/// Writes buffered log lines to disk. The handle lives in a static that is
/// never dropped, so every exit path of the binary must call this.
pub fn flush_logging() {
    if let Some(state) = LOGGING_STATE.get() {
        state.logger.flush();
    }
}

/// Active `(level, log_dir)`, or `None` before `init_logging`.
#[cfg(test)]
fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}
