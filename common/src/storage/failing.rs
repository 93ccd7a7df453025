use std::sync::Arc;

use arc_swap::ArcSwap;
use async_trait::async_trait;

use super::{Storage, StorageError, StorageResult};
use crate::stat::{StatEntry, StatKind, StatValue};

/// Injected failure that fires either once or on every call.
#[derive(Clone)]
enum Failure {
    /// Error is returned once, then automatically cleared.
    Once(StorageError),
    /// Error is returned on every subsequent call until explicitly cleared.
    Persistent(StorageError),
}

type FailSlot = ArcSwap<Option<Failure>>;

/// Checks a [`FailSlot`] and returns an error if one is set.
///
/// For [`Failure::Once`], the slot is atomically swapped to `None` so the
/// error fires exactly once. For [`Failure::Persistent`], the slot is left
/// unchanged.
fn check_failure(slot: &FailSlot) -> StorageResult<()> {
    let guard = slot.load();
    match guard.as_ref() {
        None => Ok(()),
        Some(Failure::Persistent(err)) => Err(err.clone()),
        Some(Failure::Once(_)) => {
            // Swap to None; if another thread raced us, one of them gets the
            // error and the rest pass through, which is fine for tests.
            let prev = slot.swap(Arc::new(None));
            match prev.as_ref() {
                Some(Failure::Once(err)) => Err(err.clone()),
                _ => Ok(()),
            }
        }
    }
}

/// Identifies one [`Storage`] operation for failure injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageOp {
    Register,
    Increment,
    Update,
    Get,
    GetAll,
    Reset,
    Destroy,
    Close,
}

const OP_COUNT: usize = 8;

impl StorageOp {
    fn index(self) -> usize {
        self as usize
    }
}

/// A storage wrapper that delegates to an inner [`Storage`] but can inject
/// failures into any operation on demand.
///
/// Each operation has a failure slot controlled by a lock-free
/// [`ArcSwap`](arc_swap::ArcSwap). The read path avoids introducing
/// artificial synchronisation that could mask concurrency bugs in the code
/// under test.
///
/// Failures can be *persistent* (returned on every call until cleared) or
/// *once* (returned on the next call, then automatically cleared).
///
/// Gated behind the `test-utils` feature.
///
/// # Example
///
/// ```ignore
/// let inner = Arc::new(MemoryStorage::new());
/// let storage = FailingStorage::wrap(inner);
/// storage.fail(StorageOp::Increment, StorageError::Storage("down".into()));
/// // every increment call now returns Err(...)
///
/// storage.fail_once(StorageOp::Get, StorageError::Storage("io error".into()));
/// // only the next get call returns Err(...), then auto-clears
/// ```
pub struct FailingStorage {
    inner: Arc<dyn Storage>,
    slots: [FailSlot; OP_COUNT],
}

impl FailingStorage {
    /// Wraps an existing storage, with all failure injections initially `None`.
    pub fn wrap(inner: Arc<dyn Storage>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            slots: std::array::from_fn(|_| ArcSwap::from_pointee(None)),
        })
    }

    /// Makes `op` return the given error on every subsequent call until cleared.
    pub fn fail(&self, op: StorageOp, err: StorageError) {
        self.slots[op.index()].store(Arc::new(Some(Failure::Persistent(err))));
    }

    /// Makes `op` return the given error on the next call only.
    pub fn fail_once(&self, op: StorageOp, err: StorageError) {
        self.slots[op.index()].store(Arc::new(Some(Failure::Once(err))));
    }

    /// Clears any injected failure for `op`.
    pub fn clear(&self, op: StorageOp) {
        self.slots[op.index()].store(Arc::new(None));
    }

    fn check(&self, op: StorageOp) -> StorageResult<()> {
        check_failure(&self.slots[op.index()])
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn register(&self, name: String, kind: StatKind) -> StorageResult<bool> {
        self.check(StorageOp::Register)?;
        self.inner.register(name, kind).await
    }

    async fn increment(&self, name: &str, delta: i64) -> StorageResult<i64> {
        self.check(StorageOp::Increment)?;
        self.inner.increment(name, delta).await
    }

    async fn update(&self, name: &str, value: StatValue) -> StorageResult<()> {
        self.check(StorageOp::Update)?;
        self.inner.update(name, value).await
    }

    async fn get(&self, name: &str) -> StorageResult<Option<StatValue>> {
        self.check(StorageOp::Get)?;
        self.inner.get(name).await
    }

    async fn get_all(&self) -> StorageResult<Vec<StatEntry>> {
        self.check(StorageOp::GetAll)?;
        self.inner.get_all().await
    }

    async fn reset(&self, name: &str) -> StorageResult<()> {
        self.check(StorageOp::Reset)?;
        self.inner.reset(name).await
    }

    async fn destroy(&self, name: &str) -> StorageResult<bool> {
        self.check(StorageOp::Destroy)?;
        self.inner.destroy(name).await
    }

    async fn close(&self) -> StorageResult<()> {
        self.check(StorageOp::Close)?;
        self.inner.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory::MemoryStorage;
    use super::*;

    fn wrapped() -> Arc<FailingStorage> {
        FailingStorage::wrap(Arc::new(MemoryStorage::new()))
    }

    #[tokio::test]
    async fn should_fail_persistently_until_cleared() {
        // given
        let storage = wrapped();
        storage
            .register("hits".to_string(), StatKind::Counter)
            .await
            .unwrap();
        storage.fail(
            StorageOp::Increment,
            StorageError::Storage("down".to_string()),
        );

        // when
        let first = storage.increment("hits", 1).await;
        let second = storage.increment("hits", 1).await;
        storage.clear(StorageOp::Increment);
        let third = storage.increment("hits", 1).await;

        // then
        assert_eq!(first, Err(StorageError::Storage("down".to_string())));
        assert_eq!(second, Err(StorageError::Storage("down".to_string())));
        assert_eq!(third, Ok(1));
    }

    #[tokio::test]
    async fn should_fail_exactly_once() {
        // given
        let storage = wrapped();
        storage
            .register("status".to_string(), StatKind::Value)
            .await
            .unwrap();
        storage.fail_once(
            StorageOp::Get,
            StorageError::Internal("torn read".to_string()),
        );

        // when
        let first = storage.get("status").await;
        let second = storage.get("status").await;

        // then
        assert_eq!(first, Err(StorageError::Internal("torn read".to_string())));
        assert_eq!(second, Ok(Some(StatValue::Null)));
    }

    #[tokio::test]
    async fn should_not_affect_other_operations() {
        // given
        let storage = wrapped();
        storage
            .register("hits".to_string(), StatKind::Counter)
            .await
            .unwrap();
        storage.fail(
            StorageOp::Destroy,
            StorageError::Storage("down".to_string()),
        );

        // when
        let incremented = storage.increment("hits", 1).await;
        let destroyed = storage.destroy("hits").await;

        // then
        assert_eq!(incremented, Ok(1));
        assert_eq!(destroyed, Err(StorageError::Storage("down".to_string())));
    }
}
