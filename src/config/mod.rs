//! Configuration loaded from `~/.thankful-wall/config.toml`.
//!
//! The file is optional; when it does not exist every field falls back to
//! its default. Command-line flags override individual values afterwards.

mod loader;
mod types;

pub use loader::{config_path, expand_home, load_config};
pub use types::{AdminConfig, LoggingConfig, StoreBackend, StoreConfig, WallConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}
