//! Startup configuration.
//!
//! Values come from built-in defaults, then an optional JSON file, then CLI
//! flags. Only settings that shape the session live here; records are never
//! read from or written to disk.

use crate::cli::CliArgs;
use crate::error::{AppError, AppResult};
use crate::logging::normalize_level;
use crate::store::{ActiveView, StoreOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const LOG_DIR_NAME: &str = "taskdeck-logs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub seed_mock_data: bool,
    pub start_view: ActiveView,
    pub enforce_references: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: std::env::temp_dir().join(LOG_DIR_NAME),
            seed_mock_data: true,
            start_view: ActiveView::Tasks,
            enforce_references: false,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then `--config`, then the remaining flags.
    pub fn resolve(args: &CliArgs) -> AppResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&mut self, args: &CliArgs) {
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(dir) = &args.log_dir {
            self.log_dir = dir.clone();
        }
        if args.empty {
            self.seed_mock_data = false;
        }
        if let Some(view) = args.view {
            self.start_view = view;
        }
        if args.strict_references {
            self.enforce_references = true;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        normalize_level(&self.log_level).map_err(AppError::InvalidConfig)?;
        if !self.log_dir.is_absolute() {
            return Err(AppError::InvalidConfig(format!(
                "log_dir must be an absolute path, got `{}`",
                self.log_dir.display()
            )));
        }
        Ok(())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            enforce_references: self.enforce_references,
        }
    }
}
