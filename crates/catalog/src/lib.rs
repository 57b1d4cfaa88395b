//! Game catalog records and the catalog store abstraction.
//!
//! The catalog is owned by the host application. This crate only defines
//! what the scanner needs from it: listing platforms and games, reading and
//! writing a handful of named string fields, and persisting changes.
//! [`JsonCatalog`] is a file-backed implementation used by the CLI and tests.

pub mod error;
pub mod fields;
pub mod json_store;
pub mod store;
pub mod types;

pub use error::CatalogError;
pub use fields::{ALL_SIZE_FIELDS, EST_REQUIRED_SPACE, GAME_SIZE, GAME_SIZE_TIER, LAST_SCANNED};
pub use json_store::{CatalogDocument, CatalogGame, CatalogPlatform, JsonCatalog};
pub use store::{CatalogStore, set_field_if_changed};
pub use types::GameRecord;
