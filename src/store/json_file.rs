//! Entry store backed by a single JSON document on disk.

use super::{BulkOutcome, EntriesDocument, EntryStore, ReorderOutcome, StoreError};
use crate::entry::{Entry, EntryFields, EntryId, EntryPatch, OptionalField};
use crate::utils::{atomic_write, now_iso};
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Reads the whole document on every call and replaces it atomically on
/// every write.
///
/// Writes within one process are serialized by a mutex; the file itself is
/// not locked against other processes.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (or prepare) the document at `path`.
    ///
    /// Creates the parent directory and checks that an existing document
    /// parses. A missing file is fine: it reads as an empty wall.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let store = Self {
            path,
            write_lock: Mutex::new(()),
        };
        let document = store.load().await?;
        debug!(
            "Opened {} with {} entries",
            store.path.display(),
            document.entries.len()
        );
        Ok(store)
    }

    async fn load(&self) -> Result<EntriesDocument, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(EntriesDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, document: &EntriesDocument) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(document)?;
        atomic_write(&self.path, &content).await?;
        Ok(())
    }

    /// Load, change and write back the document as one step.
    ///
    /// Nothing is written if `change` fails.
    async fn modify<T, F>(&self, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut EntriesDocument) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        let out = change(&mut document)?;
        self.save(&document).await?;
        Ok(out)
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    fn backend(&self) -> &'static str {
        "json"
    }

    async fn create(&self, fields: EntryFields) -> Result<EntryId, StoreError> {
        let now = now_iso();
        self.modify(move |doc| doc.insert(fields, now)).await
    }

    async fn read_all(&self) -> Result<HashMap<EntryId, Entry>, StoreError> {
        Ok(self.load().await?.entries.into_iter().collect())
    }

    async fn get(&self, id: &EntryId) -> Result<Entry, StoreError> {
        self.load().await?.get(id).cloned()
    }

    async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<(), StoreError> {
        let now = now_iso();
        self.modify(move |doc| doc.update(id, patch, now)).await
    }

    async fn clear_field(&self, id: &EntryId, field: OptionalField) -> Result<(), StoreError> {
        let now = now_iso();
        self.modify(move |doc| doc.clear_field(id, field, now)).await
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        self.modify(|doc| doc.remove(id).map(drop)).await
    }

    async fn delete_all(&self) -> Result<BulkOutcome, StoreError> {
        self.modify(|doc| Ok(doc.remove_all())).await
    }

    async fn reorder(&self, selection: &[EntryId]) -> Result<ReorderOutcome, StoreError> {
        let now = now_iso();
        self.modify(move |doc| doc.reorder(selection, &now)).await
    }
}
