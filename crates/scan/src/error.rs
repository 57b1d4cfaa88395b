use gamesize_catalog::CatalogError;

/// Errors that abort a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("no scan fields selected")]
    NothingSelected,

    #[error("background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for ScanError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Task(e.to_string())
    }
}
