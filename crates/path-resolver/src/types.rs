use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Why a game could not be given a path to measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueCategory {
    /// The application path is a launcher URL such as `steam://run/220`.
    StorefrontGame,
    /// The application path is a directory on a platform that expects a file.
    AmbiguousDirectoryAsApplicationPath,
    ApplicationPathNotFound,
    PathNotDetermined,
    /// Resolution itself failed unexpectedly.
    InternalError,
}

impl IssueCategory {
    /// Report heading for this category.
    pub fn label(self) -> &'static str {
        match self {
            Self::StorefrontGame => "Storefront Game",
            Self::AmbiguousDirectoryAsApplicationPath => "Ambiguous Directory as ApplicationPath",
            Self::ApplicationPathNotFound => "Application Path Not Found",
            Self::PathNotDetermined => "Path Not Determined",
            Self::InternalError => "Internal Error",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of resolving a game record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Measure this file or directory.
    Path(PathBuf),
    Unresolved {
        category: IssueCategory,
        detail: String,
    },
}

impl ResolvedTarget {
    pub(crate) fn unresolved(category: IssueCategory, detail: impl Into<String>) -> Self {
        Self::Unresolved {
            category,
            detail: detail.into(),
        }
    }

    /// Returns the resolved path, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Path(p) => Some(p),
            Self::Unresolved { .. } => None,
        }
    }

    /// Returns the issue category when unresolved.
    pub fn category(&self) -> Option<IssueCategory> {
        match self {
            Self::Path(_) => None,
            Self::Unresolved { category, .. } => Some(*category),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_display() {
        for category in [
            IssueCategory::StorefrontGame,
            IssueCategory::AmbiguousDirectoryAsApplicationPath,
            IssueCategory::ApplicationPathNotFound,
            IssueCategory::PathNotDetermined,
            IssueCategory::InternalError,
        ] {
            assert_eq!(category.to_string(), category.label());
        }
        assert_eq!(IssueCategory::StorefrontGame.label(), "Storefront Game");
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_string(&IssueCategory::ApplicationPathNotFound).unwrap();
        assert_eq!(json, "\"applicationPathNotFound\"");
    }
}
