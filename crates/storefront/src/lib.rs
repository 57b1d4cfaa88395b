//! Storefront estimate of a game's required disk space.
//!
//! Looks a title up on [RAWG](https://rawg.io), reads the PC system
//! requirements and parses the storage line into a byte count. Results,
//! including failures, are cached in memory for a week.

pub mod api;
pub mod cache;
pub mod client;
pub mod estimator;
pub mod requirements;
pub mod types;

pub use api::{GameMetadataApi, SearchQuery};
pub use cache::{CacheEntry, Clock, DEFAULT_TTL, EstimateCache, SystemClock};
pub use client::{Error, RawgClient};
pub use estimator::{EstimateOutcome, StorefrontEstimator};
pub use requirements::{parse_storage_requirement, sanitize_title};
