//! Core StatsRegistry implementation with registration, mutation, and read APIs.

use std::sync::Arc;

use common::storage::factory::create_storage;
use common::{StatEntry, StatKind, StatValue, Storage};

use crate::config::Config;
use crate::error::{Error, Result};

/// The main statistics interface providing registration, mutation, and read
/// operations over named statistics.
///
/// `StatsRegistry` is the primary entry point for tracking process-local
/// metrics. Callers register a statistic once under a unique name, then
/// mutate it by relative increments (counters) or absolute replacement
/// (value statistics), and read single values or whole snapshots back.
///
/// # Consistency
///
/// Every operation is forwarded to the storage backend, which makes it
/// atomic with respect to concurrent callers: registrations admit a single
/// winner, increments never lose updates, and reads never observe torn
/// values. Batch helpers are not atomic as a batch; each element is an
/// independent operation.
///
/// # Thread Safety
///
/// `StatsRegistry` is designed to be shared across threads. All methods take
/// `&self` and synchronization is handled by the backend.
///
/// # Example
///
/// ```ignore
/// use openstats::{Config, StatKind, StatValue, StatsRegistry};
///
/// let stats = StatsRegistry::open(Config::default()).await?;
///
/// stats.register("requests", StatKind::Counter).await?;
/// stats.increment("requests").await?;
///
/// stats.register("build", StatKind::Value).await?;
/// stats.update("build", "1.4.2").await?;
///
/// assert_eq!(stats.get("requests").await?, StatValue::Integer(1));
/// ```
pub struct StatsRegistry {
    storage: Arc<dyn Storage>,
}

impl StatsRegistry {
    /// Opens a registry with the given configuration.
    ///
    /// The storage backend is resolved exactly once, here, and bound for the
    /// registry's lifetime. Statistics declared in the configuration are
    /// registered before the registry is returned.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration specifying the storage backend and any
    ///   statistics to pre-register.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialized or a
    /// declared statistic cannot be registered.
    pub async fn open(config: Config) -> Result<Self> {
        let storage = create_storage(&config.storage)?;
        let registry = Self { storage };

        for decl in &config.statistics {
            registry.register(decl.name.clone(), decl.kind).await?;
        }
        tracing::debug!(
            backend = ?config.storage,
            statistics = config.statistics.len(),
            "stats registry opened"
        );

        Ok(registry)
    }

    /// Creates a registry from an existing storage implementation.
    ///
    /// This is how embedders supply their own backend; [`open`](Self::open)
    /// is the configuration-driven equivalent.
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Registers a statistic under a unique name.
    ///
    /// Returns `true` if the statistic was newly created, `false` if the
    /// name was already registered. An existing statistic is never
    /// overwritten, whatever kind is supplied the second time.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails.
    pub async fn register(&self, name: impl Into<String>, kind: StatKind) -> Result<bool> {
        Ok(self.storage.register(name.into(), kind).await?)
    }

    /// Registers a batch of statistics, preserving input order.
    ///
    /// Returns one `(name, created)` pair per input element. The batch is
    /// not atomic; on a storage failure, earlier registrations remain in
    /// effect.
    pub async fn register_many<S: Into<String>>(
        &self,
        stats: impl IntoIterator<Item = (S, StatKind)>,
    ) -> Result<Vec<(String, bool)>> {
        let mut results = Vec::new();
        for (name, kind) in stats {
            let name = name.into();
            let created = self.storage.register(name.clone(), kind).await?;
            results.push((name, created));
        }
        Ok(results)
    }

    /// Increments a counter by one and returns the new value.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatistic`] if `name` is not registered,
    /// [`Error::InvalidArgument`] if it is not a counter.
    pub async fn increment(&self, name: &str) -> Result<i64> {
        self.increment_by(name, 1).await
    }

    /// Applies a relative delta to a counter and returns the new value.
    ///
    /// `delta` may be negative. The arithmetic wraps on i64 overflow.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatistic`] if `name` is not registered,
    /// [`Error::InvalidArgument`] if it is not a counter.
    pub async fn increment_by(&self, name: &str, delta: i64) -> Result<i64> {
        Ok(self.storage.increment(name, delta).await?)
    }

    /// Replaces the payload of a value statistic, returning the stored
    /// value.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatistic`] if `name` is not registered,
    /// [`Error::InvalidArgument`] if it is not a value statistic.
    pub async fn update(&self, name: &str, value: impl Into<StatValue>) -> Result<StatValue> {
        let value = value.into();
        self.storage.update(name, value.clone()).await?;
        Ok(value)
    }

    /// Returns the current value of a statistic.
    ///
    /// Counters read back as [`StatValue::Integer`]; value statistics
    /// return their last payload, [`StatValue::Null`] if never updated.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatistic`] if `name` is not registered.
    pub async fn get(&self, name: &str) -> Result<StatValue> {
        match self.storage.get(name).await? {
            Some(value) => Ok(value),
            None => Err(Error::UnknownStatistic(name.to_string())),
        }
    }

    /// Returns a point-in-time snapshot of every registered statistic.
    ///
    /// Order is unspecified and no entry is ever torn.
    pub async fn get_all(&self) -> Result<Vec<StatEntry>> {
        Ok(self.storage.get_all().await?)
    }

    /// Removes a statistic, returning `true` if it existed.
    ///
    /// Idempotent: destroying an absent name is `Ok(false)`, not an error.
    /// The name becomes available for fresh registration afterwards.
    pub async fn destroy(&self, name: &str) -> Result<bool> {
        Ok(self.storage.destroy(name).await?)
    }

    /// Removes a batch of statistics, preserving input order.
    ///
    /// Returns one `(name, removed)` pair per input element. The batch is
    /// not atomic; on a storage failure, earlier removals remain in effect.
    pub async fn destroy_many<S: Into<String>>(
        &self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Vec<(String, bool)>> {
        let mut results = Vec::new();
        for name in names {
            let name = name.into();
            let removed = self.storage.destroy(&name).await?;
            results.push((name, removed));
        }
        Ok(results)
    }

    /// Resets a statistic to its neutral value: 0 for counters,
    /// [`StatValue::Null`] for value statistics.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownStatistic`] if `name` is not registered.
    pub async fn reset(&self, name: &str) -> Result<()> {
        Ok(self.storage.reset(name).await?)
    }

    /// Resets a batch of statistics, preserving input order.
    ///
    /// Returns one `(name, reset)` pair per input element; `false` means
    /// the name was not registered. The batch is not atomic; on a storage
    /// failure, earlier resets remain in effect.
    pub async fn reset_many<S: Into<String>>(
        &self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Vec<(String, bool)>> {
        let mut results = Vec::new();
        for name in names {
            let name = name.into();
            match self.reset(&name).await {
                Ok(()) => results.push((name, true)),
                Err(Error::UnknownStatistic(_)) => results.push((name, false)),
                Err(err) => return Err(err),
            }
        }
        Ok(results)
    }

    /// Closes the registry, releasing backend resources.
    pub async fn close(self) -> Result<()> {
        Ok(self.storage.close().await?)
    }
}
