pub mod config;
pub mod factory;
#[cfg(feature = "test-utils")]
pub mod failing;
pub mod memory;
pub mod sharded;

use async_trait::async_trait;

use crate::stat::{StatEntry, StatKind, StatValue};

/// Error type for storage operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The name has no current registration
    UnknownName(String),
    /// Operation applied to a statistic of the wrong kind
    KindMismatch {
        name: String,
        expected: StatKind,
        actual: StatKind,
    },
    /// Storage-related errors
    Storage(String),
    /// Internal errors
    Internal(String),
}

impl std::error::Error for StorageError {}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StorageError::UnknownName(name) => write!(f, "Unknown statistic name: {}", name),
            StorageError::KindMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Kind mismatch for '{}': expected {}, found {}",
                name, expected, actual
            ),
            StorageError::Storage(msg) => write!(f, "Storage error: {}", msg),
            StorageError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl StorageError {
    /// Converts a backend error to StorageError::Storage.
    pub fn from_storage(e: impl std::fmt::Display) -> Self {
        StorageError::Storage(e.to_string())
    }

    pub fn unknown_name(name: impl Into<String>) -> Self {
        StorageError::UnknownName(name.into())
    }

    pub fn kind_mismatch(name: impl Into<String>, expected: StatKind, actual: StatKind) -> Self {
        StorageError::KindMismatch {
            name: name.into(),
            expected,
            actual,
        }
    }
}

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// The storage type encapsulates ownership of statistic state.
///
/// Exactly one backend is bound per registry, resolved once at construction.
/// Backends hold the authoritative name-to-statistic map and must make each
/// operation atomic with respect to concurrent callers; the registry layers
/// no locking of its own on top.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Registers `name` with the given kind.
    ///
    /// Atomic check-then-insert: of any number of concurrent registrations of
    /// the same new name, exactly one reports `true`. Returns `false` when the
    /// name is already registered, leaving the existing statistic untouched
    /// whatever kind was supplied the second time.
    async fn register(&self, name: String, kind: StatKind) -> StorageResult<bool>;

    /// Applies a relative delta to a counter and returns the new value.
    ///
    /// Atomic read-modify-write: concurrent increments may interleave in any
    /// order but none may be lost. `delta` may be negative.
    ///
    /// # Errors
    ///
    /// [`StorageError::UnknownName`] if `name` is not registered,
    /// [`StorageError::KindMismatch`] if it is not a counter.
    async fn increment(&self, name: &str, delta: i64) -> StorageResult<i64>;

    /// Replaces the payload of a value statistic.
    ///
    /// # Errors
    ///
    /// [`StorageError::UnknownName`] if `name` is not registered,
    /// [`StorageError::KindMismatch`] if it is not a value statistic.
    async fn update(&self, name: &str, value: StatValue) -> StorageResult<()>;

    /// Returns the current value, or `None` when the name is not registered.
    ///
    /// Reads never observe a half-written value.
    async fn get(&self, name: &str) -> StorageResult<Option<StatValue>>;

    /// Returns one entry per registered statistic.
    ///
    /// Order is unspecified but stable within one returned snapshot, and no
    /// entry is ever torn.
    async fn get_all(&self) -> StorageResult<Vec<StatEntry>>;

    /// Restores the kind-appropriate neutral value: 0 for counters,
    /// [`StatValue::Null`] for value statistics.
    ///
    /// # Errors
    ///
    /// [`StorageError::UnknownName`] if `name` is not registered.
    async fn reset(&self, name: &str) -> StorageResult<()>;

    /// Removes `name`, returning `true` if it existed.
    ///
    /// Idempotent: destroying an absent name is `Ok(false)`, not an error.
    /// After removal the name is available for fresh registration.
    async fn destroy(&self, name: &str) -> StorageResult<bool>;

    /// Closes the storage, releasing any resources.
    async fn close(&self) -> StorageResult<()>;
}
