//! Tool-directory data model, identity-key normalization, and JSON store.
//!
//! This crate defines the flat record shape for directory entries without
//! any transformation logic. Consumers use these types directly for
//! serialization, display, or passing to `devdex-curate` for cleanup.

pub mod normalize;
pub mod store;
pub mod types;

pub use normalize::{is_generic_reference, name_key, url_key};
pub use store::{StoreError, load, save, snapshot, to_json_string};
pub use types::{ItemRecord, ItemStatus};
