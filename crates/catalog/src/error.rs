//! Error types for catalog access.

/// Errors produced by a catalog store.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("unknown game: {0}")]
    UnknownGame(String),
}
