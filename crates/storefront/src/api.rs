//! Transport seam between the estimator and the RAWG API.

use std::future::Future;
use std::pin::Pin;

use crate::client::Error;
use crate::types::{GameDetails, SearchResponse};

/// Parameters of a `GET /games` search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub search: String,
    /// Ask RAWG for a precise (not fuzzy) match.
    pub precise: bool,
    pub platform_id: u64,
    pub page_size: u32,
}

impl SearchQuery {
    /// Query parameters, excluding the API key.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("search".to_string(), self.search.clone())];
        if self.precise {
            params.push(("search_precise".into(), "true".into()));
        }
        params.push(("platforms".into(), self.platform_id.to_string()));
        params.push(("page_size".into(), self.page_size.to_string()));
        params
    }
}

/// Game metadata lookups used by the estimator.
///
/// Implemented by [`crate::RawgClient`]; tests substitute a fake.
pub trait GameMetadataApi: Send + Sync {
    /// Searches games by title.
    fn search_games(
        &self,
        query: &SearchQuery,
    ) -> Pin<Box<dyn Future<Output = Result<SearchResponse, Error>> + Send + '_>>;

    /// Fetches the details of one game.
    fn game_details(
        &self,
        slug: &str,
    ) -> Pin<Box<dyn Future<Output = Result<GameDetails, Error>> + Send + '_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precise_query_params() {
        let query = SearchQuery {
            search: "Half-Life 2".into(),
            precise: true,
            platform_id: 4,
            page_size: 1,
        };
        assert_eq!(
            query.params(),
            vec![
                ("search".to_string(), "Half-Life 2".to_string()),
                ("search_precise".into(), "true".into()),
                ("platforms".into(), "4".into()),
                ("page_size".into(), "1".into()),
            ]
        );
    }

    #[test]
    fn broad_query_omits_precise() {
        let query = SearchQuery {
            search: "Doom".into(),
            precise: false,
            platform_id: 4,
            page_size: 1,
        };
        assert!(!query.params().iter().any(|(k, _)| k == "search_precise"));
    }
}
