//! Display order of the wall.
//!
//! Featured entries (those with a `manual_order`) come first, ascending by
//! position with ties broken by ascending id. Everything else follows,
//! newest first (descending id).

use crate::entry::{Entry, EntryId};
use std::collections::HashMap;

/// The display sequence of `entries`.
///
/// Deterministic: the result does not depend on the map's iteration order.
#[must_use]
pub fn compute_order(entries: &HashMap<EntryId, Entry>) -> Vec<EntryId> {
    let (mut featured, mut recent): (Vec<_>, Vec<_>) = entries
        .iter()
        .partition(|(_, entry)| entry.manual_order.is_some());

    featured.sort_by(|(a_id, a), (b_id, b)| {
        a.manual_order
            .cmp(&b.manual_order)
            .then_with(|| a_id.cmp(b_id))
    });
    recent.sort_by(|(a_id, _), (b_id, _)| b_id.cmp(a_id));

    featured
        .into_iter()
        .chain(recent)
        .map(|(id, _)| id.clone())
        .collect()
}

/// `entries` as `(id, entry)` pairs in display order.
#[must_use]
pub fn ordered_entries(mut entries: HashMap<EntryId, Entry>) -> Vec<(EntryId, Entry)> {
    compute_order(&entries)
        .into_iter()
        .filter_map(|id| entries.remove(&id).map(|entry| (id, entry)))
        .collect()
}
