//! RAWG API response types.
//!
//! Only the fields the estimator reads are modelled; everything else in
//! the responses is ignored.

use serde::{Deserialize, Serialize};

/// RAWG platform id for PC.
pub const PC_PLATFORM_ID: u64 = 4;

/// Response of `GET /games`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<GameSummary>,
}

/// A search hit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSummary {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of `GET /games/{slug}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameDetails {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<PlatformEntry>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformEntry {
    #[serde(default)]
    pub platform: Option<PlatformRef>,
    #[serde(default)]
    pub requirements: Option<Requirements>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Free-text system requirements.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default)]
    pub minimum: Option<String>,
    #[serde(default)]
    pub recommended: Option<String>,
}

impl GameDetails {
    /// Returns the requirement text for a platform: `minimum`, or
    /// `recommended` when the minimum is blank.
    ///
    /// Only the first entry for the platform is considered.
    pub fn requirements_for(&self, platform_id: u64) -> Option<&str> {
        let entry = self
            .platforms
            .as_deref()?
            .iter()
            .find(|p| p.platform.as_ref().is_some_and(|p| p.id == platform_id))?;
        let requirements = entry.requirements.as_ref()?;
        non_blank(&requirements.minimum).or_else(|| non_blank(&requirements.recommended))
    }
}

fn non_blank(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.trim().is_empty())
}
