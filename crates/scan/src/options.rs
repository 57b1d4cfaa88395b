//! Per-batch scan options.

use serde::{Deserialize, Serialize};

/// Which fields a scan writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Write the formatted local size.
    pub store_game_size: bool,
    /// Write the size tier label.
    pub store_size_tier: bool,
    /// Write today's date as the last scan date.
    pub store_last_scanned: bool,
    /// Look up and write the storefront estimate.
    pub fetch_estimate: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            store_game_size: true,
            store_size_tier: false,
            store_last_scanned: false,
            fetch_estimate: false,
        }
    }
}

impl ScanOptions {
    /// Returns `true` if at least one field is selected.
    pub fn any_selected(&self) -> bool {
        self.store_game_size || self.store_size_tier || self.store_last_scanned || self.fetch_estimate
    }

    /// The options actually applied: the estimate is dropped when the
    /// estimator has no credential.
    pub fn effective(self, estimator_configured: bool) -> Self {
        Self {
            fetch_estimate: self.fetch_estimate && estimator_configured,
            ..self
        }
    }
}
