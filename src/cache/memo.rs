//! Fixed-expiry in-memory memo cache
//!
//! Entries carry their own expiry instant. A read that finds an expired entry
//! removes it and reports a miss; nothing sweeps the map in the background.
//! Reads never extend an entry's lifetime.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default time-to-live for memoized values.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// A cached value together with the instant it stops being served.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when the TTL reaches past the clock's range
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}

/// Process-wide key/value store with per-entry expiry.
///
/// Each key is read and written atomically. There is no cross-key
/// consistency: two keys set back to back may be observed independently.
pub struct MemoCache<V: Clone> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    default_ttl: Duration,
}

impl<V: Clone> MemoCache<V> {
    /// Create an empty cache whose `set_default` uses `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// TTL applied by `set_default`.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Look up a key. Expired entries are dropped and reported as absent.
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Re-check under the write lock: a concurrent `set` may have replaced
        // the stale entry in the meantime.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
            tracing::trace!(key, "Evicted expired cache entry");
        }
        None
    }

    /// Store a value, overwriting any existing entry for the key. A TTL too
    /// large to represent never expires.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Store a value with the cache's default TTL.
    pub async fn set_default(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl).await;
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of stored entries, expired ones included until they are read.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V: Clone> Default for MemoCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache: MemoCache<String> = MemoCache::default();
        cache.set_default("pokemon:1", "bulbasaur".to_string()).await;

        assert_eq!(cache.get("pokemon:1").await.as_deref(), Some("bulbasaur"));
        assert!(cache.get("pokemon:2").await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let cache: MemoCache<u32> = MemoCache::default();
        cache.set_default("k", 1).await;
        cache.set_default("k", 2).await;

        assert_eq!(cache.get("k").await, Some(2));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_boundary() {
        let cache: MemoCache<u32> = MemoCache::default();
        cache.set("k", 7, Duration::from_secs(10)).await;

        tokio::time::advance(Duration::from_millis(9_999)).await;
        assert_eq!(cache.get("k").await, Some(7));

        tokio::time::advance(Duration::from_millis(2)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_removed_on_read() {
        let cache: MemoCache<u32> = MemoCache::default();
        cache.set("stale", 1, Duration::from_secs(1)).await;
        cache.set("fresh", 2, Duration::from_secs(100)).await;

        tokio::time::advance(Duration::from_secs(5)).await;
        // Not swept until read
        assert_eq!(cache.len().await, 2);

        assert!(cache.get("stale").await.is_none());
        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.get("fresh").await, Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_does_not_refresh_ttl() {
        let cache: MemoCache<u32> = MemoCache::default();
        cache.set("k", 1, Duration::from_secs(10)).await;

        for _ in 0..3 {
            tokio::time::advance(Duration::from_secs(3)).await;
            assert_eq!(cache.get("k").await, Some(1));
        }

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let cache: MemoCache<u32> = MemoCache::default();
        cache.set_default("a", 1).await;
        cache.set_default("b", 2).await;

        cache.clear().await;

        assert!(cache.is_empty().await);
        assert!(cache.get("a").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_writers_distinct_keys() {
        let cache: Arc<MemoCache<usize>> = Arc::new(MemoCache::default());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let cache = cache.clone();
                tokio::spawn(async move {
                    cache.set_default(format!("key-{}", i), i).await;
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len().await, 32);
        for i in 0..32 {
            assert_eq!(cache.get(&format!("key-{}", i)).await, Some(i));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_ttl_never_expires() {
        let cache = MemoCache::new(Duration::from_secs(u64::MAX));
        cache.set_default("k", 1).await;

        tokio::time::advance(Duration::from_secs(365 * 24 * 60 * 60)).await;
        assert_eq!(cache.get("k").await, Some(1));
    }
}
