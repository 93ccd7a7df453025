use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use super::{Storage, StorageError, StorageResult};
use crate::stat::{StatEntry, StatKind, StatValue, Statistic};

/// Sharded implementation of the Storage trait using a concurrent hash map.
///
/// Names hash across independently locked shards, so mutations of unrelated
/// statistics proceed in parallel while operations on any single name
/// serialize on its shard lock. This gives the same read-modify-write
/// atomicity as the memory backend without the global write lock. `get_all`
/// visits shards one at a time: every returned value is untorn and was
/// current when its shard was read, but the snapshot is not atomic across
/// shards.
pub struct ShardedStorage {
    data: DashMap<String, Statistic>,
}

impl ShardedStorage {
    /// Creates a new ShardedStorage with the default shard count
    /// (sized from available parallelism).
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }

    /// Creates a new ShardedStorage with an explicit shard count.
    ///
    /// `shards` must be a power of two and at least two; the storage factory
    /// validates this before constructing the backend.
    pub fn with_shards(shards: usize) -> Self {
        Self {
            data: DashMap::with_shard_amount(shards),
        }
    }
}

impl Default for ShardedStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for ShardedStorage {
    async fn register(&self, name: String, kind: StatKind) -> StorageResult<bool> {
        // The entry holds the shard's write lock, making check-then-insert atomic.
        match self.data.entry(name) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(Statistic::new(kind));
                Ok(true)
            }
        }
    }

    async fn increment(&self, name: &str, delta: i64) -> StorageResult<i64> {
        let mut stat = self
            .data
            .get_mut(name)
            .ok_or_else(|| StorageError::unknown_name(name))?;
        match stat.increment(delta) {
            Some(value) => Ok(value),
            None => Err(StorageError::kind_mismatch(
                name,
                StatKind::Counter,
                stat.kind(),
            )),
        }
    }

    async fn update(&self, name: &str, value: StatValue) -> StorageResult<()> {
        let mut stat = self
            .data
            .get_mut(name)
            .ok_or_else(|| StorageError::unknown_name(name))?;
        if stat.update(value) {
            Ok(())
        } else {
            Err(StorageError::kind_mismatch(
                name,
                StatKind::Value,
                stat.kind(),
            ))
        }
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get(&self, name: &str) -> StorageResult<Option<StatValue>> {
        Ok(self.data.get(name).map(|stat| stat.current()))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    async fn get_all(&self) -> StorageResult<Vec<StatEntry>> {
        Ok(self
            .data
            .iter()
            .map(|entry| StatEntry {
                name: entry.key().clone(),
                value: entry.value().current(),
            })
            .collect())
    }

    async fn reset(&self, name: &str) -> StorageResult<()> {
        let mut stat = self
            .data
            .get_mut(name)
            .ok_or_else(|| StorageError::unknown_name(name))?;
        stat.reset();
        Ok(())
    }

    async fn destroy(&self, name: &str) -> StorageResult<bool> {
        Ok(self.data.remove(name).is_some())
    }

    async fn close(&self) -> StorageResult<()> {
        // No-op for in-memory storage
        Ok(())
    }
}
