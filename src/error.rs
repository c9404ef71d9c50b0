use std::path::PathBuf;
use thiserror::Error;

/// Failures of the outer surface: terminal, config and logging setup.
/// Store operations never fail and do not use this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read config `{}`: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config `{}`: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type AppResult<T> = Result<T, AppError>;
