//! Cache registry - Central management for all caches.

use std::any::{Any, type_name};
use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::{CacheError, TypedCache};

/// Central registry of named caches.
///
/// Each name maps to exactly one [`TypedCache`], created lazily by
/// [`get_or_create`](Self::get_or_create) and kept for the lifetime of the
/// registry. Clearing empties caches but never unregisters them.
///
/// The registry is cheap to clone; clones share the same caches.
#[derive(Clone)]
pub struct CacheRegistry {
    caches: Arc<RwLock<HashMap<String, Box<dyn ErasedCache>>>>,
}

/// Type-erased view of a registered cache.
trait ErasedCache: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn clear(&self);
    fn type_name(&self) -> &'static str;
}

impl<K, V> ErasedCache for TypedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clear(&self) {
        self.invalidate_all();
    }

    fn type_name(&self) -> &'static str {
        type_name::<Self>()
    }
}

impl CacheRegistry {
    /// Create a new empty cache registry.
    pub fn new() -> Self {
        info!("Cache registry initialized");
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get an existing cache by name.
    ///
    /// Returns `Ok(None)` if no cache is registered under `name`.
    pub fn get<K, V>(&self, name: &str) -> Result<Option<TypedCache<K, V>>, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        let caches = self.caches.read();
        caches
            .get(name)
            .map(|entry| downcast(name, entry.as_ref()))
            .transpose()
    }

    /// Get an existing cache or register a new empty one.
    ///
    /// Concurrent callers asking for the same new name all receive the same
    /// cache. Fails only if `name` is already registered with other types.
    pub fn get_or_create<K, V>(&self, name: &str) -> Result<TypedCache<K, V>, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
    {
        if let Some(cache) = self.get(name)? {
            return Ok(cache);
        }

        let mut caches = self.caches.write();

        // Another caller may have registered it between the two locks.
        if let Some(existing) = caches.get(name) {
            return downcast(name, existing.as_ref());
        }

        debug!("Creating cache: {}", name);
        let cache = TypedCache::<K, V>::new(name);
        caches.insert(name.to_string(), Box::new(cache.clone()));

        Ok(cache)
    }

    /// Cache-aside lookup in the named cache, creating the cache on first use.
    ///
    /// See [`TypedCache::fetch`].
    pub async fn fetch<K, V, F>(&self, name: &str, key: K, compute: F) -> Result<V, CacheError>
    where
        K: Hash + Eq + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
        F: Future<Output = anyhow::Result<V>>,
    {
        let cache = self.get_or_create::<K, V>(name)?;
        cache.fetch(key, compute).await
    }

    /// Check if a cache with the given name exists.
    #[allow(dead_code)]
    pub fn contains(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Get the number of registered caches.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// Check if the registry is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }

    /// Get all registered cache names, including empty caches.
    #[allow(dead_code)]
    pub fn cache_names(&self) -> BTreeSet<String> {
        self.caches.read().keys().cloned().collect()
    }

    /// Remove every entry from one cache.
    ///
    /// Returns `false` (and does nothing) if no cache has that name.
    #[allow(dead_code)]
    pub fn clear(&self, name: &str) -> bool {
        match self.caches.read().get(name) {
            Some(cache) => {
                debug!("Clearing cache with name: {}", name);
                cache.clear();
                true
            }
            None => false,
        }
    }

    /// Remove every entry from every cache. Caches stay registered.
    ///
    /// Returns the number of caches cleared.
    pub fn clear_all(&self) -> usize {
        let caches = self.caches.read();
        for (name, cache) in caches.iter() {
            debug!("Clearing cache with name: {}", name);
            cache.clear();
        }
        caches.len()
    }
}

fn downcast<K, V>(name: &str, entry: &dyn ErasedCache) -> Result<TypedCache<K, V>, CacheError>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    entry
        .as_any()
        .downcast_ref::<TypedCache<K, V>>()
        .cloned()
        .ok_or_else(|| CacheError::TypeMismatch {
            name: name.to_string(),
            expected: type_name::<TypedCache<K, V>>(),
            found: entry.type_name(),
        })
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let caches = self.caches.read();
        f.debug_struct("CacheRegistry")
            .field("cache_count", &caches.len())
            .field("cache_names", &caches.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn load_names(calls: &AtomicUsize) -> anyhow::Result<Arc<Vec<&'static str>>> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(vec!["user_1", "user_2"]))
    }

    async fn load_count(calls: &AtomicUsize, fail: bool) -> anyhow::Result<u32> {
        calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            anyhow::bail!("storage unavailable");
        }
        Ok(5)
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_cache() {
        let registry = CacheRegistry::new();

        let first: TypedCache<u32, String> = registry.get_or_create("users").unwrap();
        first.insert(1, "alice".to_string()).await;

        let second: TypedCache<u32, String> = registry.get_or_create("users").unwrap();
        assert_eq!(second.get(&1).await.as_deref(), Some("alice"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_type_mismatch_is_an_error() {
        let registry = CacheRegistry::new();
        let _: TypedCache<u32, String> = registry.get_or_create("users").unwrap();

        let err = registry.get_or_create::<u32, u64>("users").unwrap_err();
        assert!(matches!(err, CacheError::TypeMismatch { ref name, .. } if name == "users"));
    }

    #[test]
    fn test_get_unknown_is_none() {
        let registry = CacheRegistry::new();
        assert!(registry.get::<(), u32>("missing").unwrap().is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_cache_names_include_empty_caches() {
        let registry = CacheRegistry::new();
        let _: TypedCache<(), u32> = registry.get_or_create("users").unwrap();
        let _: TypedCache<(), u32> = registry.get_or_create("user_details").unwrap();

        let names: Vec<_> = registry.cache_names().into_iter().collect();
        assert_eq!(names, vec!["user_details".to_string(), "users".to_string()]);
        assert!(registry.contains("users"));
    }

    #[tokio::test]
    async fn test_clear_all_is_idempotent() {
        let registry = CacheRegistry::new();
        let users: TypedCache<u32, u32> = registry.get_or_create("users").unwrap();
        let details: TypedCache<u32, u32> = registry.get_or_create("details").unwrap();
        users.insert(1, 10).await;
        details.insert(2, 20).await;

        assert_eq!(registry.clear_all(), 2);
        assert_eq!(users.get(&1).await, None);
        assert_eq!(details.get(&2).await, None);

        assert_eq!(registry.clear_all(), 2);
        assert_eq!(users.get(&1).await, None);
        assert_eq!(registry.cache_names().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_single_cache() {
        let registry = CacheRegistry::new();
        let users: TypedCache<u32, u32> = registry.get_or_create("users").unwrap();
        let details: TypedCache<u32, u32> = registry.get_or_create("details").unwrap();
        users.insert(1, 10).await;
        details.insert(2, 20).await;

        assert!(registry.clear("users"));
        assert_eq!(users.get(&1).await, None);
        assert_eq!(details.get(&2).await, Some(20));

        assert!(!registry.clear("unknown"));
    }

    #[tokio::test]
    async fn test_fetch_misses_again_after_clear_all() {
        let registry = CacheRegistry::new();
        let calls = AtomicUsize::new(0);

        let first = registry.fetch("users", (), load_names(&calls)).await.unwrap();
        let second = registry.fetch("users", (), load_names(&calls)).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        registry.clear_all();

        let third = registry.fetch("users", (), load_names(&calls)).await.unwrap();
        assert_eq!(third, first);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_then_success_recomputes() {
        let registry = CacheRegistry::new();
        let calls = AtomicUsize::new(0);

        assert!(registry.fetch("flaky", (), load_count(&calls, true)).await.is_err());
        assert_eq!(registry.fetch("flaky", (), load_count(&calls, false)).await.unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        assert_eq!(registry.fetch("flaky", (), load_count(&calls, false)).await.unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
