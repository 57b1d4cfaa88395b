//! Domain types shared with the rest of the workspace.

use serde::{Deserialize, Serialize};

/// One catalog entry as seen by the scanner.
///
/// `application_path` may be a filesystem path, a launcher URL such as
/// `steam://run/220`, or empty. `root_folder` may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub application_path: String,
    #[serde(default)]
    pub root_folder: String,
    #[serde(default)]
    pub platform: String,
}

impl GameRecord {
    /// Returns the application path, or `None` when it is blank.
    pub fn application_path(&self) -> Option<&str> {
        non_blank(&self.application_path)
    }

    /// Returns the root folder, or `None` when it is blank.
    pub fn root_folder(&self) -> Option<&str> {
        non_blank(&self.root_folder)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
