//! Title to required-space estimate.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::{GameMetadataApi, SearchQuery};
use crate::cache::EstimateCache;
use crate::client::Error;
use crate::requirements::{parse_storage_requirement, sanitize_title};
use crate::types::PC_PLATFORM_ID;

pub const REASON_NOT_CONFIGURED: &str = "not configured";
pub const REASON_EMPTY_TITLE: &str = "empty title";
pub const REASON_NOT_FOUND: &str = "not found";
pub const REASON_INCOMPLETE_DATA: &str = "incomplete data";
pub const REASON_NO_SIZE: &str = "no size in data";
pub const REASON_NETWORK: &str = "network error";
pub const REASON_PARSE: &str = "parse error";

/// Result of an estimate lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum EstimateOutcome {
    /// Estimated required space in bytes.
    Bytes(u64),
    /// Short reason, e.g. `"not found"` or `"search error: 500"`.
    Failure(String),
}

impl EstimateOutcome {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure(reason.into())
    }

    pub fn bytes(&self) -> Option<u64> {
        match self {
            Self::Bytes(n) => Some(*n),
            Self::Failure(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Bytes(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

impl fmt::Display for EstimateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(n) => write!(f, "{n} bytes"),
            Self::Failure(reason) => write!(f, "lookup failed ({reason})"),
        }
    }
}

/// Looks up required disk space on the storefront, through the cache.
pub struct StorefrontEstimator {
    api: Option<Arc<dyn GameMetadataApi>>,
    cache: Arc<EstimateCache>,
}

impl StorefrontEstimator {
    /// `api` is `None` when no credential is configured; every lookup then
    /// fails with `"not configured"` without touching the network.
    pub fn new(api: Option<Arc<dyn GameMetadataApi>>, cache: Arc<EstimateCache>) -> Self {
        Self { api, cache }
    }

    /// An estimator that always reports `"not configured"`.
    pub fn disabled() -> Self {
        Self::new(None, Arc::new(EstimateCache::new()))
    }

    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    pub fn cache(&self) -> &Arc<EstimateCache> {
        &self.cache
    }

    /// Returns the estimated required space for `title`.
    pub async fn estimate_required_space(&self, title: &str) -> EstimateOutcome {
        let Some(api) = self.api.as_deref() else {
            return EstimateOutcome::failure(REASON_NOT_CONFIGURED);
        };
        let title = title.trim();
        if title.is_empty() {
            return EstimateOutcome::failure(REASON_EMPTY_TITLE);
        }

        let key = EstimateCache::key_for(title);
        if let Some(entry) = self.cache.get(&key) {
            debug!(title, outcome = %entry.value, "estimate cache hit");
            return entry.value.clone();
        }

        let outcome = fetch(api, title).await;
        if outcome.failure_reason() == Some(REASON_NOT_CONFIGURED) {
            warn!(title, "RAWG API key invalid; not caching");
            return outcome;
        }
        match &outcome {
            EstimateOutcome::Bytes(bytes) => info!(title, bytes, "storefront estimate"),
            EstimateOutcome::Failure(reason) => debug!(title, %reason, "storefront lookup failed"),
        }
        self.cache.insert(key, outcome.clone());
        outcome
    }
}

async fn fetch(api: &dyn GameMetadataApi, title: &str) -> EstimateOutcome {
    match try_fetch(api, title).await {
        Ok(outcome) => outcome,
        Err(Error::Http(e)) => {
            warn!(title, error = %e, "RAWG request failed");
            EstimateOutcome::failure(REASON_NETWORK)
        }
        Err(Error::Json(e)) => {
            warn!(title, error = %e, "RAWG response not understood");
            EstimateOutcome::failure(REASON_PARSE)
        }
        Err(Error::InvalidKey) => EstimateOutcome::failure(REASON_NOT_CONFIGURED),
        Err(Error::Api { status, .. }) => EstimateOutcome::failure(format!("API error: {status}")),
    }
}

/// Search, refine, read requirements.
///
/// HTTP status failures are turned into outcomes here; transport and
/// decoding errors propagate.
async fn try_fetch(api: &dyn GameMetadataApi, title: &str) -> Result<EstimateOutcome, Error> {
    let mut query = SearchQuery {
        search: sanitize_title(title),
        precise: true,
        platform_id: PC_PLATFORM_ID,
        page_size: 1,
    };

    let search = match api.search_games(&query).await {
        Err(Error::Api { status, .. }) => {
            debug!(title, status, "precise search failed, retrying broad");
            query.precise = false;
            match api.search_games(&query).await {
                Err(Error::Api { status, .. }) => {
                    return Ok(EstimateOutcome::failure(format!("search error: {status}")));
                }
                other => other?,
            }
        }
        other => other?,
    };

    let Some(hit) = search.results.first() else {
        return Ok(EstimateOutcome::failure(REASON_NOT_FOUND));
    };
    let Some(slug) = hit.slug.as_deref().filter(|s| !s.is_empty()) else {
        return Ok(EstimateOutcome::failure(REASON_INCOMPLETE_DATA));
    };

    let details = match api.game_details(slug).await {
        Err(Error::Api { status, .. }) => {
            return Ok(EstimateOutcome::failure(format!("details error: {status}")));
        }
        other => other?,
    };

    let bytes = details
        .requirements_for(PC_PLATFORM_ID)
        .and_then(parse_storage_requirement);
    Ok(match bytes {
        Some(bytes) => EstimateOutcome::Bytes(bytes),
        None => {
            debug!(title, slug, "no storage size in requirements");
            EstimateOutcome::failure(REASON_NO_SIZE)
        }
    })
}
