//! Common test utilities

use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use thankful_wall::{AdminGate, EntryForm, EntryStore, JsonFileStore, Wall};

/// Password configured on every test wall
#[allow(dead_code)] // Test utility for integration tests
pub const PASSWORD: &str = "grateful";

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// A wall over a JSON document at `path`, with moderation enabled
#[allow(dead_code)] // Test utility for integration tests
pub async fn open_json_wall(path: &Path) -> Wall {
    let store = JsonFileStore::open(path)
        .await
        .expect("Failed to open JSON store");
    let store: Arc<dyn EntryStore> = Arc::new(store);
    Wall::new(store, AdminGate::new(Some(PASSWORD.to_string())))
}

/// A valid submission with the given english name
#[allow(dead_code)] // Test utility for integration tests
pub fn entry_form(name: &str, role_class: &str) -> EntryForm {
    EntryForm {
        english_name: name.to_string(),
        chinese_name: format!("{name}（中文）"),
        role_class: role_class.to_string(),
        thankful_for: format!("{name} is thankful for friends"),
    }
}

/// Write `content` as the entries document at `path`
#[allow(dead_code)] // Test utility for integration tests
pub fn write_document(path: &Path, content: &str) {
    std::fs::write(path, content).expect("Failed to write entries document");
}
