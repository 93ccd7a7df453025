use serde::{Deserialize, Serialize};

/// Selects which storage backend holds statistic state.
///
/// Resolved once, when a registry opens; the binding is immutable for the
/// registry's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageConfig {
    /// Single table behind one read-write lock (the reference backend).
    #[default]
    Memory,
    /// Names sharded across independently locked tables.
    Sharded(ShardedStorageConfig),
}

/// Options for the sharded backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardedStorageConfig {
    /// Number of shards. Must be a power of two and at least two.
    ///
    /// `None` leaves the count to the library, which sizes it from available
    /// parallelism.
    #[serde(default)]
    pub shards: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_memory_backend() {
        assert_eq!(StorageConfig::default(), StorageConfig::Memory);
    }

    #[test]
    fn should_deserialize_backend_selection() {
        // given
        let memory: StorageConfig = serde_json::from_str(r#""memory""#).unwrap();
        let sharded: StorageConfig =
            serde_json::from_str(r#"{"sharded":{"shards":8}}"#).unwrap();

        // then
        assert_eq!(memory, StorageConfig::Memory);
        assert_eq!(
            sharded,
            StorageConfig::Sharded(ShardedStorageConfig { shards: Some(8) })
        );
    }

    #[test]
    fn should_round_trip_through_json() {
        // given
        let config = StorageConfig::Sharded(ShardedStorageConfig { shards: None });

        // when
        let encoded = serde_json::to_string(&config).unwrap();
        let decoded: StorageConfig = serde_json::from_str(&encoded).unwrap();

        // then
        assert_eq!(decoded, config);
    }
}
