//! Entry storage.
//!
//! The wall talks to its backing collection through the [`EntryStore`]
//! trait. Two backends ship with the crate:
//! - [`JsonFileStore`]: a single JSON document on disk, re-read on every call
//! - [`MemoryStore`]: the same document held in process memory
//!
//! [`open_store`] builds the configured backend once at startup. If that
//! fails the process gets an [`UnavailableStore`] instead, and every later
//! operation reports the store as unavailable.

mod document;
mod json_file;
mod memory;
mod unavailable;

pub use document::EntriesDocument;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use unavailable::UnavailableStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::entry::{Entry, EntryFields, EntryId, EntryPatch, OptionalField};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Entry '{0}' not found")]
    NotFound(EntryId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the backing store could not be reached or read.
    ///
    /// Everything except [`StoreError::NotFound`] counts: an unreadable or
    /// corrupt document is as unusable as a missing connection.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

/// One entry a bulk operation could not process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFailure {
    pub id: EntryId,
    pub reason: String,
}

/// Result of an operation applied to many entries.
///
/// Bulk operations are not atomic across entries in general, so the
/// operator sees how many succeeded and which ones did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: usize,
    pub failed: Vec<BulkFailure>,
}

impl BulkOutcome {
    #[must_use]
    pub fn all_succeeded(count: usize) -> Self {
        Self {
            succeeded: count,
            failed: Vec::new(),
        }
    }

    pub fn record_success(&mut self) {
        self.succeeded = self.succeeded.saturating_add(1);
    }

    pub fn record_failure(&mut self, id: EntryId, reason: impl Into<String>) {
        self.failed.push(BulkFailure {
            id,
            reason: reason.into(),
        });
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Result of featuring a selection of entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReorderOutcome {
    /// Entries that lost a featured position and were not re-featured
    pub cleared: usize,
    /// Entries given a position from the selection
    pub featured: usize,
}

/// A durable collection of entries keyed by store-assigned ids.
///
/// Every read goes to the backing store; implementations keep no
/// authoritative cache. Operations are not retried.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Persist a new entry and return its fresh id.
    ///
    /// On failure nothing is persisted.
    async fn create(&self, fields: EntryFields) -> Result<EntryId, StoreError>;

    /// Every stored entry, in no particular order.
    async fn read_all(&self) -> Result<HashMap<EntryId, Entry>, StoreError>;

    /// One stored entry.
    async fn get(&self, id: &EntryId) -> Result<Entry, StoreError>;

    /// Merge `patch` into an existing entry.
    async fn update(&self, id: &EntryId, patch: EntryPatch) -> Result<(), StoreError>;

    /// Remove a single optional field, leaving the rest of the entry as is.
    async fn clear_field(&self, id: &EntryId, field: OptionalField) -> Result<(), StoreError>;

    /// Remove an entry entirely.
    async fn delete(&self, id: &EntryId) -> Result<(), StoreError>;

    /// Remove every entry.
    async fn delete_all(&self) -> Result<BulkOutcome, StoreError>;

    /// Clear every featured position, then feature `selection` as `1..=n`.
    ///
    /// Implementations must apply both phases as one unit, or document that
    /// a concurrent reader may observe the store with nothing featured
    /// between the two phases. Both shipped backends apply it as one unit.
    async fn reorder(&self, selection: &[EntryId]) -> Result<ReorderOutcome, StoreError>;
}

/// Build the configured store.
///
/// Initialization failures are logged and turn into an [`UnavailableStore`]
/// for the rest of the process lifetime.
pub async fn open_store(config: &StoreConfig) -> Arc<dyn EntryStore> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory entry store");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Json => match JsonFileStore::open(&config.path).await {
            Ok(store) => {
                info!("Using JSON entry store at {}", config.path.display());
                Arc::new(store)
            }
            Err(e) => {
                error!(
                    "Failed to open entry store at {}: {}",
                    config.path.display(),
                    e
                );
                Arc::new(UnavailableStore::new(e.to_string()))
            }
        },
    }
}
