use std::fmt;
use std::path::PathBuf;

use gamesize_catalog::GameRecord;
use gamesize_disk_usage::{SKIPPED_SIZE_CODE, SizeOutcome};
use gamesize_path_resolver::IssueCategory;
use gamesize_storefront::EstimateOutcome;
use serde::Serialize;

use crate::report::ScanReport;

/// Which games a batch covers.
#[derive(Debug, Clone)]
pub enum BatchSource {
    /// An explicit selection.
    Games(Vec<GameRecord>),
    /// Every game on the named platform.
    Platform(String),
}

impl fmt::Display for BatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Games(games) => write!(f, "{} selected game(s)", games.len()),
            Self::Platform(name) => write!(f, "platform '{name}'"),
        }
    }
}

/// What happened to a single game.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameScanResult {
    pub game_id: String,
    pub title: String,
    /// The path that was measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Why no path could be measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueCategory>,
    /// `None` when no path resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeOutcome>,
    /// `None` when no lookup was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<EstimateOutcome>,
    /// Whether any catalog field changed.
    pub fields_changed: bool,
}

impl GameScanResult {
    /// Size as a signed code: bytes, a negative error code, or
    /// [`SKIPPED_SIZE_CODE`] when nothing was measured.
    pub fn size_code(&self) -> i64 {
        self.size.map_or(SKIPPED_SIZE_CODE, SizeOutcome::code)
    }
}

/// Everything a finished batch hands to its completion callback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutcome {
    /// Human description of the batch source.
    pub context: String,
    pub games_total: usize,
    pub results: Vec<GameScanResult>,
    pub report: ScanReport,
    /// Set when the batch stopped early; `report` then holds what was
    /// collected before the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<String>,
}

impl BatchOutcome {
    /// Games actually processed.
    pub fn games_processed(&self) -> usize {
        self.results.len()
    }

    /// Closing summary line.
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Size calculation finished for {}: {} of {} game(s) processed.",
            self.context,
            self.games_processed(),
            self.games_total
        );
        if self.report.is_empty() {
            line.push_str(" No issues reported.");
        } else {
            line.push_str(&format!(" {} issue(s) reported.", self.report.issue_count()));
        }
        if let Some(fatal) = &self.fatal {
            line.push_str(&format!(" Critical error: {fatal}"));
        }
        line
    }
}

/// Result of clearing size fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearOutcome {
    pub games: usize,
    /// Games that had at least one field removed.
    pub cleared: usize,
}
