//! Storage factory for creating storage instances from configuration.

use std::sync::Arc;

use super::config::StorageConfig;
use super::memory::MemoryStorage;
use super::sharded::ShardedStorage;
use super::{Storage, StorageError, StorageResult};

/// Creates a storage backend based on the provided configuration.
///
/// Resolution happens exactly once, when a registry opens; the returned
/// handle is the registry's storage binding for its whole lifetime.
///
/// # Arguments
///
/// * `config` - The storage configuration specifying the backend type and settings.
///
/// # Errors
///
/// Returns `StorageError::Storage` when the configuration carries an invalid
/// knob, such as a shard count that is not a power of two.
pub fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    match config {
        StorageConfig::Memory => Ok(Arc::new(MemoryStorage::new())),
        StorageConfig::Sharded(sharded) => match sharded.shards {
            None => Ok(Arc::new(ShardedStorage::new())),
            Some(shards) => {
                // DashMap panics on a bad shard amount; refuse it here instead.
                if shards < 2 || !shards.is_power_of_two() {
                    return Err(StorageError::Storage(format!(
                        "Invalid shard count {}: must be a power of two and at least two",
                        shards
                    )));
                }
                Ok(Arc::new(ShardedStorage::with_shards(shards)))
            }
        },
    }
}
