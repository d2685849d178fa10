//! Typed named cache wrapper around Moka.

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, trace};

use super::CacheError;

/// A named, typed cache over Moka's async cache.
///
/// Entries never expire on their own and there is no capacity bound: a value
/// stays until the cache is cleared or the key invalidated.
///
/// Cloning is cheap and shares the same underlying cache.
pub struct TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Cache<K, V>,
    name: Arc<str>,
}

// Manual Clone implementation that doesn't require K: Clone, V: Clone
impl<K, V> Clone for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            name: Arc::clone(&self.name),
        }
    }
}

impl<K, V> TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty cache with the given name.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        let inner = Cache::builder().name(&name).build();
        Self { inner, name }
    }

    /// Get the name of this cache.
    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Insert a key-value pair, replacing any previous value for the key.
    #[allow(dead_code)]
    pub async fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    /// Get a value from the cache.
    #[allow(dead_code)]
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    /// Check if a key exists in the cache.
    #[allow(dead_code)]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    /// Remove a key from the cache.
    #[allow(dead_code)]
    pub async fn invalidate(&self, key: &K) {
        self.inner.invalidate(key).await;
    }

    /// Remove all entries from the cache.
    ///
    /// Once this returns, no `get` or `fetch` observes an entry inserted
    /// before the call, even if Moka has not physically evicted it yet.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get the number of entries in the cache.
    ///
    /// Note: Moka updates this lazily, so it may lag behind recent writes.
    #[allow(dead_code)]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Cache-aside lookup.
    ///
    /// Returns the cached value for `key` without polling `compute`. On a miss,
    /// awaits `compute`, stores its value and returns it.
    ///
    /// Concurrent misses for the same key are coalesced: only one `compute`
    /// runs and every waiting caller receives its outcome. A failed
    /// computation is returned as [`CacheError::Compute`] and is not stored,
    /// so the next call computes again.
    pub async fn fetch<F>(&self, key: K, compute: F) -> Result<V, CacheError>
    where
        F: Future<Output = anyhow::Result<V>>,
    {
        let name = &self.name;
        trace!(cache = %name, "Cache lookup");

        self.inner
            .try_get_with(key, async move {
                debug!(cache = %name, "Cache miss, computing value");
                compute.await
            })
            .await
            .map_err(|error| CacheError::Compute {
                name: name.to_string(),
                error,
            })
    }
}

impl<K, V> std::fmt::Debug for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedCache")
            .field("name", &self.name)
            .field("entry_count", &self.inner.entry_count())
            .finish()
    }
}
