// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

pub mod config;
pub mod entry;
pub mod logging;
pub mod ordering;
pub mod store;
pub mod utils;
pub mod wall;

// Re-export commonly used types
pub use config::{load_config, ConfigError, StoreBackend, StoreConfig, WallConfig};
pub use entry::{Entry, EntryFields, EntryForm, EntryId, EntryPatch, OptionalField, ValidationError};
pub use ordering::{compute_order, ordered_entries};
pub use store::{
    open_store, BulkFailure, BulkOutcome, EntriesDocument, EntryStore, JsonFileStore, MemoryStore,
    ReorderOutcome, StoreError, UnavailableStore,
};
pub use wall::{AdminGate, Moderator, Wall, WallError, WallStats, WallView, DELETE_ALL_CONFIRMATION};
