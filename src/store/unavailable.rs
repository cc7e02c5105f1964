use super::{BulkOutcome, EntryStore, ReorderOutcome, StoreError};
use crate::entry::{Entry, EntryFields, EntryId, EntryPatch, OptionalField};
use async_trait::async_trait;
use std::collections::HashMap;

/// Stand-in for a store that failed to initialize.
///
/// There is no reconnection: every operation fails with
/// [`StoreError::Unavailable`] carrying the original reason.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T, StoreError> {
        Err(StoreError::Unavailable(self.reason.clone()))
    }
}

#[async_trait]
impl EntryStore for UnavailableStore {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn create(&self, _fields: EntryFields) -> Result<EntryId, StoreError> {
        self.fail()
    }

    async fn read_all(&self) -> Result<HashMap<EntryId, Entry>, StoreError> {
        self.fail()
    }

    async fn get(&self, _id: &EntryId) -> Result<Entry, StoreError> {
        self.fail()
    }

    async fn update(&self, _id: &EntryId, _patch: EntryPatch) -> Result<(), StoreError> {
        self.fail()
    }

    async fn clear_field(&self, _id: &EntryId, _field: OptionalField) -> Result<(), StoreError> {
        self.fail()
    }

    async fn delete(&self, _id: &EntryId) -> Result<(), StoreError> {
        self.fail()
    }

    async fn delete_all(&self) -> Result<BulkOutcome, StoreError> {
        self.fail()
    }

    async fn reorder(&self, _selection: &[EntryId]) -> Result<ReorderOutcome, StoreError> {
        self.fail()
    }
}
