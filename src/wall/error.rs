use crate::entry::{EntryId, ValidationError};
use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by wall operations.
///
/// None of these are fatal: the presentation layer shows the message and
/// the wall carries on.
#[derive(Error, Debug)]
pub enum WallError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Entry '{0}' is selected more than once")]
    DuplicateSelection(EntryId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Incorrect admin password")]
    Unauthorized,

    #[error("Moderation is disabled: no admin password is configured")]
    AdminDisabled,

    #[error("Confirmation phrase did not match; type {expected:?} to delete every entry")]
    ConfirmationMismatch { expected: &'static str },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl WallError {
    /// Whether the backing store could not be reached.
    #[must_use]
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::Store(e) if e.is_unavailable())
    }

    /// Whether the operation targeted an entry that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound(_)))
    }
}
