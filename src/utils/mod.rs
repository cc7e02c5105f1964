mod atomic;

pub use atomic::atomic_write;

use std::path::PathBuf;

/// The name of the per-user application folder
pub const APP_FOLDER: &str = ".thankful-wall";

/// Default name of the JSON entries document
pub const ENTRIES_FILE: &str = "thankful_entries.json";

/// Get the path to the per-user application folder (`~/.thankful-wall`)
#[must_use]
pub fn get_app_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_FOLDER)
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Format a path for display, replacing home directory with ~/
#[must_use]
pub fn format_display_path(path: &str) -> String {
    replace_homedir::replace_homedir(path, "~")
}
