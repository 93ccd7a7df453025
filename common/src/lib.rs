pub mod stat;
pub mod storage;

pub use stat::{StatEntry, StatKind, StatValue, Statistic};
pub use storage::config::{ShardedStorageConfig, StorageConfig};
#[cfg(feature = "test-utils")]
pub use storage::failing::{FailingStorage, StorageOp};
pub use storage::{Storage, StorageError, StorageResult};
