use crate::utils::{get_app_path, ENTRIES_FILE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which backend holds the entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// A JSON document on disk
    #[default]
    Json,
    /// Process memory, for tests and throwaway walls.
    ///
    /// Nothing survives the process, so each CLI command starts from an
    /// empty wall.
    Memory,
}

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Location of the entries document (JSON backend only)
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            path: get_app_path().join(ENTRIES_FILE),
        }
    }
}

/// `[admin]` section.
///
/// A single shared password unlocks every moderation action. This is a gate,
/// not access control: anyone who knows the password is an admin.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    /// Moderation is disabled when unset
    pub password: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Log file rotation: daily, hourly or never
    pub rotation: String,
    /// Log directory (default: ~/.thankful-wall/logs)
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            rotation: "daily".to_string(),
            dir: None,
        }
    }
}

/// Top-level configuration, deserialized from `~/.thankful-wall/config.toml`.
///
/// Every section is optional; missing values resolve to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
