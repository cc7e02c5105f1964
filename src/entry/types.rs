//! Entry record types.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Role/class stored when the submitter leaves it blank.
pub const DEFAULT_ROLE_CLASS: &str = "Not specified";

/// One gratitude submission on the wall.
///
/// The entry's id is the key it is stored under, not a field of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub english_name: String,
    pub chinese_name: String,
    pub role_class: String,
    pub thankful_for: String,
    /// Featured position; `None` means the entry falls back to recency order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_order: Option<NonZeroU32>,
    /// ISO timestamp when created (absent in legacy documents)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// ISO timestamp when last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// The validated text fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFields {
    pub english_name: String,
    pub chinese_name: String,
    pub role_class: String,
    pub thankful_for: String,
}

/// Field-level update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub english_name: Option<String>,
    pub chinese_name: Option<String>,
    pub role_class: Option<String>,
    pub thankful_for: Option<String>,
    pub manual_order: Option<NonZeroU32>,
}

/// Fields that may be removed from a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalField {
    ManualOrder,
}

impl Entry {
    /// Build a fresh entry from validated fields.
    #[must_use]
    pub fn new(fields: EntryFields, created_at: String) -> Self {
        Self {
            english_name: fields.english_name,
            chinese_name: fields.chinese_name,
            role_class: fields.role_class,
            thankful_for: fields.thankful_for,
            manual_order: None,
            created_at: Some(created_at),
            updated_at: None,
        }
    }

    /// The text fields of this entry.
    #[must_use]
    pub fn fields(&self) -> EntryFields {
        EntryFields {
            english_name: self.english_name.clone(),
            chinese_name: self.chinese_name.clone(),
            role_class: self.role_class.clone(),
            thankful_for: self.thankful_for.clone(),
        }
    }

    /// Merge a patch into this entry.
    pub fn apply(&mut self, patch: EntryPatch, updated_at: String) {
        if let Some(english_name) = patch.english_name {
            self.english_name = english_name;
        }
        if let Some(chinese_name) = patch.chinese_name {
            self.chinese_name = chinese_name;
        }
        if let Some(role_class) = patch.role_class {
            self.role_class = role_class;
        }
        if let Some(thankful_for) = patch.thankful_for {
            self.thankful_for = thankful_for;
        }
        if let Some(order) = patch.manual_order {
            self.manual_order = Some(order);
        }
        self.updated_at = Some(updated_at);
    }

    /// Remove an optional field.
    pub fn clear(&mut self, field: OptionalField, updated_at: String) {
        match field {
            OptionalField::ManualOrder => self.manual_order = None,
        }
        self.updated_at = Some(updated_at);
    }

    /// Whether the role/class names a teacher (case-insensitive substring).
    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.role_class.to_lowercase().contains("teacher")
    }
}

impl EntryPatch {
    /// Patch replacing all four text fields.
    #[must_use]
    pub fn replace_text(fields: EntryFields) -> Self {
        Self {
            english_name: Some(fields.english_name),
            chinese_name: Some(fields.chinese_name),
            role_class: Some(fields.role_class),
            thankful_for: Some(fields.thankful_for),
            manual_order: None,
        }
    }

    /// Patch assigning a featured position only.
    #[must_use]
    pub fn manual_order(order: NonZeroU32) -> Self {
        Self {
            manual_order: Some(order),
            ..Self::default()
        }
    }
}

impl fmt::Display for OptionalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManualOrder => f.write_str("manual_order"),
        }
    }
}

/// On-disk shape of an entry; tolerant of documents written by older versions.
#[derive(Deserialize)]
struct EntryRecord {
    #[serde(default)]
    english_name: String,
    #[serde(default)]
    chinese_name: String,
    #[serde(default)]
    role_class: String,
    #[serde(default)]
    thankful_for: String,
    /// Older documents wrote `0`, `null`, floats or strings here
    #[serde(default)]
    manual_order: Option<serde_json::Value>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = EntryRecord::deserialize(deserializer)?;
        let role_class = if record.role_class.trim().is_empty() {
            DEFAULT_ROLE_CLASS.to_string()
        } else {
            record.role_class
        };
        Ok(Self {
            english_name: record.english_name,
            chinese_name: record.chinese_name,
            role_class,
            thankful_for: record.thankful_for,
            manual_order: record.manual_order.as_ref().and_then(legacy_position),
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Featured position from a loosely typed stored value.
///
/// Positive integers, integral floats and numeric strings are positions.
/// Anything else, including zero and negative numbers, means not featured.
fn legacy_position(value: &serde_json::Value) -> Option<NonZeroU32> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    // f64 Display never uses exponent notation, so "2" parses and "2.5" does not
    number.to_string().parse().ok()
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
