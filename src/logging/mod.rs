mod init;

pub use init::{init_logging, parse_rotation};

use crate::config::LoggingConfig;
use crate::utils::get_app_path;
use std::path::PathBuf;
use tracing::Level;
use tracing_appender::rolling::Rotation;

/// Log filename written inside the log directory.
pub const LOG_FILENAME: &str = "thankful-wall.log";

/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: get_app_path().join("logs"),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

impl LogConfig {
    /// Build from the `[logging]` section of the config file.
    #[must_use]
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        let defaults = Self::default();
        Self {
            log_dir: settings.dir.clone().unwrap_or(defaults.log_dir),
            log_level: defaults.log_level,
            json_format: settings.json,
            rotation: parse_rotation(&settings.rotation),
        }
    }
}

#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
