//! Entry store held in process memory.

use super::{BulkOutcome, EntriesDocument, EntryStore, ReorderOutcome, StoreError};
use crate::entry::{Entry, EntryFields, EntryId, EntryPatch, OptionalField};
use crate::utils::now_iso;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Same document model as [`super::JsonFileStore`], lost when the process
/// exits. Each operation runs under one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RwLock<EntriesDocument>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create(&self, fields: EntryFields) -> Result<EntryId, StoreError> {
        self.document.write().await.insert(fields, now_iso())
    }

    async fn read_all(&self) -> Result<HashMap<EntryId, Entry>, StoreError> {
        let document = self.document.read().await;
        Ok(document
            .entries
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect())
    }

    async fn get(&self, id: &EntryId) -> Result<Entry, StoreError> {
        self.document.read().await.get(id).cloned()
    }

    async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<(), StoreError> {
        self.document.write().await.update(id, patch, now_iso())
    }

    async fn clear_field(&self, id: &EntryId, field: OptionalField) -> Result<(), StoreError> {
        self.document.write().await.clear_field(id, field, now_iso())
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        self.document.write().await.remove(id).map(drop)
    }

    async fn delete_all(&self) -> Result<BulkOutcome, StoreError> {
        Ok(self.document.write().await.remove_all())
    }

    async fn reorder(&self, selection: &[EntryId]) -> Result<ReorderOutcome, StoreError> {
        self.document.write().await.reorder(selection, &now_iso())
    }
}
