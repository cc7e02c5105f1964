//! The entries document shared by the file and memory backends.

use super::{BulkOutcome, ReorderOutcome, StoreError};
use crate::entry::{Entry, EntryFields, EntryId, EntryPatch, OptionalField};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::num::NonZeroU32;

/// `{"entries": {id: entry}, "next_id": n}`
///
/// `next_id` only ever grows, so an id freed by a delete is never handed out
/// again. Documents written before the counter existed derive it from the
/// largest decimal id present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntriesDocument {
    #[serde(default)]
    pub entries: BTreeMap<EntryId, Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<u64>,
}

impl EntriesDocument {
    /// The counter value the next created entry will receive.
    #[must_use]
    pub fn next_counter(&self) -> u64 {
        let floor = self
            .entries
            .keys()
            .filter_map(EntryId::counter_value)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        self.next_id.map_or(floor, |next| next.max(floor))
    }

    /// Insert a new entry under a fresh id.
    pub fn insert(&mut self, fields: EntryFields, now: String) -> Result<EntryId, StoreError> {
        let counter = self.next_counter();
        let id = EntryId::from_counter(counter);
        if self.entries.contains_key(&id) {
            return Err(StoreError::Unavailable("entry id space exhausted".to_string()));
        }
        self.next_id = Some(counter.saturating_add(1));
        self.entries.insert(id.clone(), Entry::new(fields, now));
        Ok(id)
    }

    pub fn get(&self, id: &EntryId) -> Result<&Entry, StoreError> {
        self.entries
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn update(&mut self, id: &EntryId, patch: EntryPatch, now: String) -> Result<(), StoreError> {
        self.entry_mut(id)?.apply(patch, now);
        Ok(())
    }

    pub fn clear_field(
        &mut self,
        id: &EntryId,
        field: OptionalField,
        now: String,
    ) -> Result<(), StoreError> {
        self.entry_mut(id)?.clear(field, now);
        Ok(())
    }

    pub fn remove(&mut self, id: &EntryId) -> Result<Entry, StoreError> {
        self.pin_counter();
        self.entries
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn remove_all(&mut self) -> BulkOutcome {
        self.pin_counter();
        let removed = self.entries.len();
        self.entries.clear();
        BulkOutcome::all_succeeded(removed)
    }

    /// Clear every featured position, then feature `selection` as `1..=n`.
    ///
    /// Every selected id must exist; otherwise nothing is changed.
    pub fn reorder(&mut self, selection: &[EntryId], now: &str) -> Result<ReorderOutcome, StoreError> {
        if let Some(missing) = selection.iter().find(|id| !self.entries.contains_key(*id)) {
            return Err(StoreError::NotFound(missing.clone()));
        }

        let selected: HashSet<&EntryId> = selection.iter().collect();
        let mut cleared = 0usize;
        for (id, entry) in &mut self.entries {
            if entry.manual_order.is_some() {
                entry.clear(OptionalField::ManualOrder, now.to_string());
                if !selected.contains(id) {
                    cleared = cleared.saturating_add(1);
                }
            }
        }

        let mut featured = 0usize;
        for (position, id) in (1u32..).zip(selection) {
            let Some(order) = NonZeroU32::new(position) else {
                continue;
            };
            self.entry_mut(id)?
                .apply(EntryPatch::manual_order(order), now.to_string());
            featured = featured.saturating_add(1);
        }

        Ok(ReorderOutcome { cleared, featured })
    }

    fn entry_mut(&mut self, id: &EntryId) -> Result<&mut Entry, StoreError> {
        self.entries
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Persist the derived counter before entries disappear.
    fn pin_counter(&mut self) {
        self.next_id = Some(self.next_counter());
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod document_tests;
