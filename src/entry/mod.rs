//! Gratitude entries.
//!
//! An entry is stored under an [`EntryId`] assigned by the store; the record
//! itself carries the submitted text fields and the optional featured
//! position used by the ordering policy.

mod form;
mod id;
mod types;

pub use form::{EntryForm, ValidationError};
pub use id::EntryId;
pub use types::{Entry, EntryFields, EntryPatch, OptionalField, DEFAULT_ROLE_CLASS};
