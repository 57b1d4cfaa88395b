//! Names of the custom fields written on game records.

/// Formatted local size, e.g. `"12.4 GB"`.
pub const GAME_SIZE: &str = "Game Size";

/// Date of the last scan, `MM/dd/yyyy`.
pub const LAST_SCANNED: &str = "Game Size Last Scanned";

/// Size tier label used for sorting and filtering.
pub const GAME_SIZE_TIER: &str = "Game Size Tier";

/// Formatted storefront estimate of the required disk space.
pub const EST_REQUIRED_SPACE: &str = "Est. Required Space";

/// Every field owned by the scanner, in the order they are cleared.
pub const ALL_SIZE_FIELDS: [&str; 4] = [GAME_SIZE, LAST_SCANNED, GAME_SIZE_TIER, EST_REQUIRED_SPACE];
