//! Measurement results and their integer encoding.

use std::fmt;

use serde::Serialize;

/// Encoded size when the path did not exist or was empty.
pub const NO_PATH_SIZE_CODE: i64 = -3;

/// Encoded size when the path existed but could not be measured.
pub const ERROR_SIZE_CODE: i64 = -2;

/// Encoded size meaning "not measured, do not store".
pub const SKIPPED_SIZE_CODE: i64 = i64::MIN;

/// Result of measuring a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "bytes", rename_all = "camelCase")]
pub enum SizeOutcome {
    /// Total size in bytes.
    Bytes(u64),
    /// The top-level directory could not be enumerated.
    AccessDenied,
    /// Some other I/O failure on an existing path.
    ComputeError,
    /// The path is empty or does not exist.
    NoPath,
}

impl SizeOutcome {
    /// Returns the byte count on success.
    pub fn bytes(self) -> Option<u64> {
        match self {
            Self::Bytes(n) => Some(n),
            _ => None,
        }
    }

    /// Integer encoding used in reports: bytes, or a negative error code.
    pub fn code(self) -> i64 {
        match self {
            Self::Bytes(n) => i64::try_from(n).unwrap_or(i64::MAX),
            Self::AccessDenied | Self::ComputeError => ERROR_SIZE_CODE,
            Self::NoPath => NO_PATH_SIZE_CODE,
        }
    }
}

impl fmt::Display for SizeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(n) => write!(f, "{n} bytes"),
            Self::AccessDenied => f.write_str("access denied"),
            Self::ComputeError => f.write_str("error computing size"),
            Self::NoPath => f.write_str("path not found"),
        }
    }
}
