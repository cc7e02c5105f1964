//! Moderation actions.

use super::{Wall, WallError};
use crate::entry::{EntryForm, EntryId, EntryPatch, OptionalField};
use crate::ordering::compute_order;
use crate::store::{BulkOutcome, EntriesDocument, ReorderOutcome};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Phrase an operator must type to delete every entry.
pub const DELETE_ALL_CONFIRMATION: &str = "DELETE ALL";

/// A handle proving the admin password was checked.
///
/// Obtained from [`Wall::unlock`]; dropping it locks moderation again.
pub struct Moderator<'w> {
    wall: &'w Wall,
}

impl<'w> Moderator<'w> {
    pub(super) fn new(wall: &'w Wall) -> Self {
        Self { wall }
    }

    /// Replace the four text fields of an entry.
    ///
    /// The featured position is left untouched.
    pub async fn edit(&self, id: &EntryId, form: &EntryForm) -> Result<(), WallError> {
        let fields = form.validate()?;
        self.wall
            .store
            .update(id, EntryPatch::replace_text(fields))
            .await?;
        info!("Entry {} edited", id);
        Ok(())
    }

    /// Feature `selection` in the given order, unfeaturing everything else.
    ///
    /// An empty selection simply unfeatures every entry.
    pub async fn feature(&self, selection: &[EntryId]) -> Result<ReorderOutcome, WallError> {
        let mut seen = HashSet::with_capacity(selection.len());
        if let Some(dup) = selection.iter().find(|id| !seen.insert(*id)) {
            return Err(WallError::DuplicateSelection(dup.clone()));
        }

        let outcome = self.wall.store.reorder(selection).await?;
        info!(
            "Featured {} entries, cleared {}",
            outcome.featured, outcome.cleared
        );
        Ok(outcome)
    }

    /// Unfeature every entry that has a featured position.
    ///
    /// Entries are cleared one at a time. A failure on one entry does not
    /// stop the rest; the outcome lists what could not be cleared.
    pub async fn reset_order(&self) -> Result<BulkOutcome, WallError> {
        let entries = self.wall.store.read_all().await?;
        let featured: Vec<EntryId> = compute_order(&entries)
            .into_iter()
            .filter(|id| entries.get(id).is_some_and(|e| e.manual_order.is_some()))
            .collect();

        let mut outcome = BulkOutcome::default();
        for id in featured {
            match self
                .wall
                .store
                .clear_field(&id, OptionalField::ManualOrder)
                .await
            {
                Ok(()) => outcome.record_success(),
                Err(e) => {
                    warn!("Failed to clear featured position of {}: {}", id, e);
                    outcome.record_failure(id, e.to_string());
                }
            }
        }

        info!(
            "Reset order: {} cleared, {} failed",
            outcome.succeeded,
            outcome.failed.len()
        );
        Ok(outcome)
    }

    /// Remove one entry.
    pub async fn delete(&self, id: &EntryId) -> Result<(), WallError> {
        self.wall.store.delete(id).await?;
        info!("Entry {} deleted", id);
        Ok(())
    }

    /// Remove every entry, provided `confirmation` is exactly
    /// [`DELETE_ALL_CONFIRMATION`].
    pub async fn delete_all(&self, confirmation: &str) -> Result<BulkOutcome, WallError> {
        if confirmation != DELETE_ALL_CONFIRMATION {
            return Err(WallError::ConfirmationMismatch {
                expected: DELETE_ALL_CONFIRMATION,
            });
        }

        let outcome = self.wall.store.delete_all().await?;
        warn!(
            "Deleted all entries: {} removed, {} failed",
            outcome.succeeded,
            outcome.failed.len()
        );
        Ok(outcome)
    }

    /// Snapshot of every stored entry, keyed by id.
    pub async fn export(&self) -> Result<EntriesDocument, WallError> {
        let entries = self.wall.store.read_all().await?;
        info!("Exported {} entries", entries.len());
        Ok(EntriesDocument {
            entries: entries.into_iter().collect(),
            next_id: None,
        })
    }

    /// Append the entries of an exported or legacy entries file.
    ///
    /// Each imported entry gets a fresh id; source entries are created in
    /// ascending id order so their relative recency survives. Entries that
    /// fail validation or storage are skipped and reported. Featured
    /// positions are carried over as they are; an entry whose position cannot
    /// be restored is removed again and reported as failed.
    pub async fn import(&self, path: &Path) -> Result<BulkOutcome, WallError> {
        let content = tokio::fs::read_to_string(path).await?;
        let document: EntriesDocument = serde_json::from_str(&content)?;

        let mut outcome = BulkOutcome::default();
        for (source_id, entry) in document.entries {
            let fields = match EntryForm::from(entry.fields()).validate() {
                Ok(fields) => fields,
                Err(e) => {
                    outcome.record_failure(source_id, e.to_string());
                    continue;
                }
            };

            let id = match self.wall.store.create(fields).await {
                Ok(id) => id,
                Err(e) => {
                    warn!("Failed to import entry {}: {}", source_id, e);
                    outcome.record_failure(source_id, e.to_string());
                    continue;
                }
            };

            if let Some(order) = entry.manual_order {
                if let Err(e) = self
                    .wall
                    .store
                    .update(&id, EntryPatch::manual_order(order))
                    .await
                {
                    // A reported failure leaves nothing stored
                    let reason = match self.wall.store.delete(&id).await {
                        Ok(()) => e.to_string(),
                        Err(rollback) => format!("{e}; {id} left without its position: {rollback}"),
                    };
                    warn!(
                        "Failed to restore position of imported entry {}: {}",
                        source_id, reason
                    );
                    outcome.record_failure(source_id, reason);
                    continue;
                }
            }

            outcome.record_success();
        }

        info!(
            "Imported {} entries from {}, {} skipped",
            outcome.succeeded,
            path.display(),
            outcome.failed.len()
        );
        Ok(outcome)
    }
}
