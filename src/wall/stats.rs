use crate::entry::{Entry, EntryId};

/// Aggregate counts shown above the wall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallStats {
    pub total: usize,
    /// Entries whose role/class mentions "teacher" (any case)
    pub teachers: usize,
    /// Everyone else
    pub students: usize,
}

impl WallStats {
    #[must_use]
    pub fn from_entries(entries: &[(EntryId, Entry)]) -> Self {
        let total = entries.len();
        let teachers = entries.iter().filter(|(_, e)| e.is_teacher()).count();
        Self {
            total,
            teachers,
            students: total.saturating_sub(teachers),
        }
    }
}
