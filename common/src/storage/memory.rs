use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{Storage, StorageError, StorageResult};
use crate::stat::{StatEntry, StatKind, StatValue, Statistic};

/// In-memory implementation of the Storage trait using a HashMap.
///
/// The reference backend: one read-write lock serializes every mutation, so
/// register is check-then-insert and increment is read-modify-write under a
/// single write-lock acquisition. Reads share the read lock. Suitable for
/// tests and for applications whose statistics see moderate write contention.
pub struct MemoryStorage {
    data: RwLock<HashMap<String, Statistic>>,
}

impl MemoryStorage {
    /// Creates a new MemoryStorage instance with an empty table.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn register(&self, name: String, kind: StatKind) -> StorageResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        match data.entry(name) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(Statistic::new(kind));
                Ok(true)
            }
        }
    }

    async fn increment(&self, name: &str, delta: i64) -> StorageResult<i64> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        let stat = data
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
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        let stat = data
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

    /// Reads a single statistic under the shared read lock.
    ///
    /// Returns `None` if the name is not registered.
    #[tracing::instrument(level = "trace", skip_all)]
    async fn get(&self, name: &str) -> StorageResult<Option<StatValue>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(name).map(Statistic::current))
    }

    /// Snapshots the whole table under one read-lock acquisition, so the
    /// returned entries reflect a single point in time.
    #[tracing::instrument(level = "trace", skip_all)]
    async fn get_all(&self) -> StorageResult<Vec<StatEntry>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .map(|(name, stat)| StatEntry {
                name: name.clone(),
                value: stat.current(),
            })
            .collect())
    }

    async fn reset(&self, name: &str) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        let stat = data
            .get_mut(name)
            .ok_or_else(|| StorageError::unknown_name(name))?;
        stat.reset();
        Ok(())
    }

    async fn destroy(&self, name: &str) -> StorageResult<bool> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(name).is_some())
    }

    async fn close(&self) -> StorageResult<()> {
        // No-op for in-memory storage
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn should_return_none_when_name_not_found() {
        // given
        let storage = MemoryStorage::new();

        // when
        let result = storage.get("missing").await;

        // then
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_register_and_retrieve_statistic() {
        // given
        let storage = MemoryStorage::new();

        // when
        let created = storage
            .register("status".to_string(), StatKind::Value)
            .await
            .unwrap();
        storage
            .update("status", StatValue::from("ok"))
            .await
            .unwrap();

        // then
        assert!(created);
        assert_eq!(
            storage.get("status").await.unwrap(),
            Some(StatValue::Text("ok".to_string()))
        );
    }

    #[tokio::test]
    async fn should_report_internal_error_when_lock_is_poisoned() {
        // given
        let storage = Arc::new(MemoryStorage::new());
        let poisoner = Arc::clone(&storage);
        let handle = std::thread::spawn(move || {
            let _guard = poisoner.data.write().unwrap();
            panic!("poison the statistics table");
        });
        assert!(handle.join().is_err());

        // when
        let result = storage.get("any").await;

        // then
        assert!(matches!(result, Err(StorageError::Internal(_))));
    }

    #[tokio::test]
    async fn should_keep_names_independent() {
        // given
        let storage = MemoryStorage::new();
        storage
            .register("a".to_string(), StatKind::Counter)
            .await
            .unwrap();
        storage
            .register("b".to_string(), StatKind::Counter)
            .await
            .unwrap();

        // when
        storage.increment("a", 10).await.unwrap();

        // then
        assert_eq!(storage.get("a").await.unwrap(), Some(StatValue::Integer(10)));
        assert_eq!(storage.get("b").await.unwrap(), Some(StatValue::Integer(0)));
    }
}
