use super::{ConfigError, WallConfig};
use crate::utils::get_app_path;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default location of the config file.
#[must_use]
pub fn config_path() -> PathBuf {
    get_app_path().join("config.toml")
}

/// Replace a leading `~` with the home directory.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Load the configuration.
///
/// With `explicit` set the file must exist. Otherwise the default location
/// is tried and a missing file yields `WallConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or parsed.
pub fn load_config(explicit: Option<&Path>) -> Result<WallConfig, ConfigError> {
    let path = match explicit {
        Some(path) => expand_home(path),
        None => {
            let path = config_path();
            if !path.exists() {
                debug!("Config not found at {}; using defaults", path.display());
                return Ok(WallConfig::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path)?;
    let mut config: WallConfig = toml::from_str(&content)?;
    config.store.path = expand_home(&config.store.path);
    config.logging.dir = config.logging.dir.as_deref().map(expand_home);
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
