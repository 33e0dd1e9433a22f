//! Time-boxed result caching.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(300); // 5 minutes

struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
}

/// Compute-and-cache-for-duration map.
///
/// Entries older than the TTL are treated as absent; the next lookup recomputes
/// them. Uses tokio's clock so paused-time tests can advance it. A zero TTL
/// disables caching.
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CacheEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> Clone for TtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            ttl: self.ttl,
        }
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn is_fresh(&self, entry: &CacheEntry<V>) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry))
            .map(|entry| entry.value.clone())
    }

    pub async fn insert(&self, key: K, value: V) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Return the cached value for `key`, or compute, store and return it.
    pub async fn get_or_insert_with<F, Fut>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(&key).await {
            return value;
        }

        let value = compute().await;
        self.insert(key, value.clone()).await;
        value
    }

    pub async fn invalidate(&self, key: &K) {
        self.entries.write().await.remove(key);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|e| self.is_fresh(e)).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        calls: AtomicUsize,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        async fn compute(&self, value: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            value.to_string()
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_caching() {
        let counter = Counter::new();
        let cache: TtlCache<String, String> = TtlCache::default();

        let v = cache
            .get_or_insert_with("a".into(), || counter.compute("one"))
            .await;
        assert_eq!(v, "one");
        assert_eq!(1, counter.call_count());

        let v = cache
            .get_or_insert_with("a".into(), || counter.compute("two"))
            .await;
        assert_eq!(v, "one");
        assert_eq!(1, counter.call_count());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let counter = Counter::new();
        let cache: TtlCache<String, String> = TtlCache::default();

        cache
            .get_or_insert_with("a".into(), || counter.compute("a"))
            .await;
        cache
            .get_or_insert_with("b".into(), || counter.compute("b"))
            .await;
        assert_eq!(2, counter.call_count());
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_expiry() {
        let counter = Counter::new();
        let cache: TtlCache<String, String> = TtlCache::new(Duration::from_secs(300));

        cache
            .get_or_insert_with("a".into(), || counter.compute("first"))
            .await;

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get(&"a".to_string()).await.as_deref(), Some("first"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get(&"a".to_string()).await.is_none());

        let v = cache
            .get_or_insert_with("a".into(), || counter.compute("second"))
            .await;
        assert_eq!(v, "second");
        assert_eq!(2, counter.call_count());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate() {
        let counter = Counter::new();
        let cache: TtlCache<String, String> = TtlCache::default();

        cache
            .get_or_insert_with("a".into(), || counter.compute("x"))
            .await;
        cache.invalidate(&"a".to_string()).await;
        cache
            .get_or_insert_with("a".into(), || counter.compute("x"))
            .await;
        assert_eq!(2, counter.call_count());

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_zero_ttl_disables_caching() {
        let counter = Counter::new();
        let cache: TtlCache<String, String> = TtlCache::new(Duration::ZERO);

        cache
            .get_or_insert_with("a".into(), || counter.compute("x"))
            .await;
        cache
            .get_or_insert_with("a".into(), || counter.compute("x"))
            .await;
        assert_eq!(2, counter.call_count());
    }
}
