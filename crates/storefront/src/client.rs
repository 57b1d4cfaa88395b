//! RAWG API client.
//!
//! Async HTTP client using `reqwest`. RAWG authenticates with a `key`
//! query parameter on every request.

use std::future::Future;
use std::pin::Pin;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::api::{GameMetadataApi, SearchQuery};
use crate::types::{GameDetails, SearchResponse};

/// Public RAWG API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";

/// Placeholder shipped in sample key files.
pub const PLACEHOLDER_KEY: &str = "YOUR_RAWG_API_KEY_HERE";

/// Errors from the RAWG client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid API key")]
    InvalidKey,
}

/// RAWG API client.
pub struct RawgClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RawgClient {
    /// Creates a new client with the given API key.
    ///
    /// Blank keys and the sample placeholder are rejected.
    pub fn new(api_key: &str) -> Result<Self, Error> {
        let api_key = api_key.trim();
        if api_key.is_empty() || api_key == PLACEHOLDER_KEY {
            return Err(Error::InvalidKey);
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("gamesize/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Sets a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Performs a GET request with the API key attached.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        trace!(%url, "RAWG request");
        let resp = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Searches games.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, Error> {
        self.get("/games", &query.params()).await
    }

    /// Returns the details of a game by slug.
    pub async fn details(&self, slug: &str) -> Result<GameDetails, Error> {
        let encoded = utf8_percent_encode(slug, NON_ALPHANUMERIC).to_string();
        self.get(&format!("/games/{encoded}"), &[]).await
    }
}

impl GameMetadataApi for RawgClient {
    fn search_games(
        &self,
        query: &SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, Error>> + Send + '_>> {
        let query = query.clone();
        Box::pin(async move { self.search(&query).await })
    }

    fn game_details(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<GameDetails, Error>> + Send + '_>> {
        let slug = slug.to_string();
        Box::pin(async move { self.details(&slug).await })
    }
}
