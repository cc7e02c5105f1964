//! The wall: public submission and viewing, plus password-gated moderation.
//!
//! [`Wall`] is what the presentation layer talks to. Public actions live on
//! it directly; moderation actions need a [`Moderator`] handle, which only
//! [`Wall::unlock`] hands out.

mod admin;
mod error;
mod moderator;
mod stats;

pub use admin::AdminGate;
pub use error::WallError;
pub use moderator::{Moderator, DELETE_ALL_CONFIRMATION};
pub use stats::WallStats;

use crate::entry::{Entry, EntryForm, EntryId};
use crate::ordering::ordered_entries;
use crate::store::EntryStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Everything needed to render the wall once.
#[derive(Debug, Clone, Default)]
pub struct WallView {
    /// Entries in display order
    pub entries: Vec<(EntryId, Entry)>,
    pub stats: WallStats,
    /// Set when the store could not be read and the wall is shown empty
    pub notice: Option<String>,
}

impl WallView {
    fn unavailable(reason: String) -> Self {
        Self {
            notice: Some(reason),
            ..Self::default()
        }
    }
}

pub struct Wall {
    store: Arc<dyn EntryStore>,
    admin: AdminGate,
}

impl Wall {
    #[must_use]
    pub fn new(store: Arc<dyn EntryStore>, admin: AdminGate) -> Self {
        Self { store, admin }
    }

    /// Validate a public submission and persist it.
    ///
    /// The new entry is not featured, so it shows at the top of the
    /// non-featured section.
    pub async fn submit(&self, form: &EntryForm) -> Result<EntryId, WallError> {
        let fields = form.validate()?;
        let id = self.store.create(fields).await?;
        info!("Entry {} submitted", id);
        Ok(id)
    }

    /// Read every entry and arrange it for display.
    ///
    /// A store that cannot be read yields an empty wall with a notice rather
    /// than an error, so viewers still get a page.
    pub async fn view(&self) -> WallView {
        match self.store.read_all().await {
            Ok(entries) => {
                let entries = ordered_entries(entries);
                let stats = WallStats::from_entries(&entries);
                WallView {
                    entries,
                    stats,
                    notice: None,
                }
            }
            Err(e) => {
                warn!(
                    "Showing empty wall, {} store unreadable: {}",
                    self.store.backend(),
                    e
                );
                WallView::unavailable(e.to_string())
            }
        }
    }

    /// Check the admin password and hand out a moderation handle.
    pub fn unlock(&self, password: &str) -> Result<Moderator<'_>, WallError> {
        self.admin.check(password)?;
        Ok(Moderator::new(self))
    }
}

#[cfg(test)]
#[path = "wall_tests.rs"]
mod wall_tests;
