//! Error types for registry operations.

use common::StorageError;

/// Error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation applied to a statistic of the wrong kind, or otherwise
    /// malformed input.
    InvalidArgument(String),

    /// The named statistic has no current registration.
    UnknownStatistic(String),

    /// Storage-related errors from the underlying backend.
    Storage(String),

    /// Internal errors indicating bugs or invariant violations.
    Internal(String),
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::UnknownStatistic(name) => write!(f, "Unknown statistic: {}", name),
            Error::Storage(msg) => write!(f, "Storage error: {}", msg),
            Error::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UnknownName(name) => Error::UnknownStatistic(name),
            mismatch @ StorageError::KindMismatch { .. } => {
                Error::InvalidArgument(mismatch.to_string())
            }
            StorageError::Storage(msg) => Error::Storage(msg),
            StorageError::Internal(msg) => Error::Internal(msg),
        }
    }
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
