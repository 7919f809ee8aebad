use std::{collections::HashMap, hash::Hash, sync::Arc};
use tokio::sync::RwLock;

use crate::errors::ServiceError;

/// Generic in-memory key-value map store.
///
/// Wraps a `HashMap<K, V>` behind a single `RwLock`. Every check-then-mutate
/// sequence runs under one write guard, so each operation either fully applies
/// or leaves the map untouched.
#[derive(Clone)]
pub struct MemoryMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Default for MemoryMapStore<K, V> {
    fn default() -> Self {
        Self { inner: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl<K, V> MemoryMapStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry.
    pub async fn list(&self) -> HashMap<K, V> {
        let map = self.inner.read().await;
        map.clone()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    /// Insert only if the key is absent; `on_conflict` builds the error otherwise.
    pub async fn insert_new<F>(&self, key: K, value: V, on_conflict: F) -> Result<V, ServiceError>
    where
        F: FnOnce() -> ServiceError,
    {
        let mut map = self.inner.write().await;
        if map.contains_key(&key) {
            return Err(on_conflict());
        }
        map.insert(key, value.clone());
        Ok(value)
    }

    /// Overwrite the value of an existing key; `on_missing` builds the error otherwise.
    ///
    /// `check` only runs once the key is known to exist, so a missing key is
    /// always reported ahead of an invalid value.
    pub async fn replace_existing<F, C>(&self, key: &K, value: V, on_missing: F, check: C) -> Result<V, ServiceError>
    where
        F: FnOnce() -> ServiceError,
        C: FnOnce(&V) -> Result<(), ServiceError>,
    {
        let mut map = self.inner.write().await;
        let slot = map.get_mut(key).ok_or_else(on_missing)?;
        check(&value)?;
        *slot = value.clone();
        Ok(value)
    }

    /// Apply a fallible mutation to an existing value and return the result.
    ///
    /// The closure works on a copy; the stored value is only swapped when it
    /// returns `Ok`.
    pub async fn update_with<F, M>(&self, key: &K, on_missing: M, f: F) -> Result<V, ServiceError>
    where
        F: FnOnce(&mut V) -> Result<(), ServiceError>,
        M: FnOnce() -> ServiceError,
    {
        let mut map = self.inner.write().await;
        let slot = map.get_mut(key).ok_or_else(on_missing)?;
        let mut draft = slot.clone();
        f(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }

    /// Remove a key, returning its previous value if it existed.
    pub async fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().await;
        map.remove(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conflict() -> ServiceError { ServiceError::Conflict("exists".into()) }
    fn missing() -> ServiceError { ServiceError::NotFound("missing".into()) }
    fn accept(_: &u32) -> Result<(), ServiceError> { Ok(()) }

    #[tokio::test]
    async fn memory_map_store_crud() -> Result<(), anyhow::Error> {
        let store = MemoryMapStore::<String, u32>::new();

        // initially empty
        assert!(store.list().await.is_empty());

        store.insert_new("a".into(), 1, conflict).await?;
        store.insert_new("b".into(), 2, conflict).await?;
        assert_eq!(store.list().await.len(), 2);
        assert_eq!(store.get(&"a".into()).await, Some(1));

        // duplicate insert keeps the first value
        assert!(matches!(store.insert_new("a".into(), 99, conflict).await, Err(ServiceError::Conflict(_))));
        assert_eq!(store.get(&"a".into()).await, Some(1));

        store.replace_existing(&"a".into(), 10, missing, accept).await?;
        assert_eq!(store.get(&"a".into()).await, Some(10));
        assert!(matches!(store.replace_existing(&"zz".into(), 1, missing, accept).await, Err(ServiceError::NotFound(_))));
        assert_eq!(store.get(&"zz".into()).await, None);

        let updated = store.update_with(&"b".into(), missing, |v| { *v += 5; Ok(()) }).await?;
        assert_eq!(updated, 7);

        assert_eq!(store.remove(&"b".into()).await, Some(7));
        assert_eq!(store.remove(&"b".into()).await, None);
        assert_eq!(store.list().await.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_leaves_value_untouched() {
        let store = MemoryMapStore::<String, u32>::new();
        store.insert_new("a".into(), 1, conflict).await.unwrap();

        let res = store
            .update_with(&"a".into(), missing, |v| {
                *v = 100;
                Err(ServiceError::Validation("rejected".into()))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(store.get(&"a".into()).await, Some(1));
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_key_admit_one_winner() {
        let store = MemoryMapStore::<String, u32>::new();
        let mut handles = Vec::new();
        for i in 0..16u32 {
            let s = store.clone();
            handles.push(tokio::spawn(async move { s.insert_new("k".into(), i, conflict).await.is_ok() }));
        }
        let mut wins = 0;
        for h in handles {
            if h.await.unwrap() { wins += 1; }
        }
        assert_eq!(wins, 1);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn replace_reports_missing_key_before_rejected_value() {
        let store = MemoryMapStore::<String, u32>::new();
        let reject = |_: &u32| Err(ServiceError::Validation("rejected".into()));

        let res = store.replace_existing(&"zz".into(), 1, missing, reject).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));

        store.insert_new("a".into(), 1, conflict).await.unwrap();
        let res = store.replace_existing(&"a".into(), 2, missing, reject).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert_eq!(store.get(&"a".into()).await, Some(1));
    }
}
