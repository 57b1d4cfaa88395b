//! Path resolution for catalogued games.
//!
//! Catalog entries often point at a launcher URL, an executable buried in
//! `Binaries/Win64`, or a shared ROM folder. [`PathResolver`] turns such an
//! entry into the single file or directory worth measuring, or into an
//! [`IssueCategory`] explaining why none could be chosen.

pub mod heuristics;
pub mod platform;
pub mod resolver;
pub mod types;

pub use platform::PlatformClass;
pub use resolver::PathResolver;
pub use types::{IssueCategory, ResolvedTarget};
