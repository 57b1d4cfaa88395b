//! Batch scanning of catalogued games.
//!
//! For each game the [`ScanCoordinator`] resolves the install path, measures
//! it, optionally asks the storefront for an estimate, writes the selected
//! fields back to the catalog and records every problem in a [`ScanReport`].

pub mod coordinator;
pub mod error;
pub mod fields;
pub mod options;
pub mod report;
pub mod types;

pub use coordinator::ScanCoordinator;
pub use error::ScanError;
pub use options::ScanOptions;
pub use report::{ScanIssue, ScanReport};
pub use types::{BatchOutcome, BatchSource, ClearOutcome, GameScanResult};
