//! Explicit result cache keyed by request content
//!
//! Keys are a hash of the request's canonical JSON, so two requests that
//! serialize identically share an entry. Entries expire after a fixed TTL.
//! Time is passed in by the caller; the cache never reads the clock itself.

use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

/// Content hash of a serializable request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u64);

impl CacheKey {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hash the canonical JSON encoding of `request`
pub fn cache_key<T: Serialize>(request: &T) -> serde_json::Result<CacheKey> {
    let encoded = serde_json::to_vec(request)?;
    let mut hasher = DefaultHasher::new();
    encoded.hash(&mut hasher);
    Ok(CacheKey(hasher.finish()))
}

#[derive(Debug, Clone)]
struct CachedEntry<V> {
    value: V,
    stored_at: Instant,
}

impl<V> CachedEntry<V> {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.stored_at) < ttl
    }
}

/// Hit/miss counters, mostly for batch logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// TTL cache of computed results
#[derive(Debug, Clone)]
pub struct AnalysisCache<V> {
    ttl: Duration,
    entries: HashMap<CacheKey, CachedEntry<V>>,
    stats: CacheStats,
}

impl<V: Clone> AnalysisCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh value for `key`, if any; a stale entry is dropped
    pub fn get(&mut self, key: CacheKey, now: Instant) -> Option<V> {
        let ttl = self.ttl;
        let fresh = match self.entries.get(&key).map(|entry| entry.is_fresh(now, ttl)) {
            Some(true) => self.entries.get(&key).map(|entry| entry.value.clone()),
            Some(false) => {
                self.entries.remove(&key);
                None
            }
            None => None,
        };

        match fresh {
            Some(_) => self.stats.hits += 1,
            None => self.stats.misses += 1,
        }
        fresh
    }

    pub fn insert(&mut self, key: CacheKey, value: V, now: Instant) {
        self.entries.insert(key, CachedEntry { value, stored_at: now });
    }

    /// Cached value, or compute, store and return a new one
    ///
    /// Errors from `compute` are returned as-is and nothing is stored.
    pub fn get_or_try_insert_with<E, F>(&mut self, key: CacheKey, now: Instant, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key, now) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(key, value.clone(), now);
        Ok(value)
    }

    /// Drop every expired entry, returning how many were removed
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.is_fresh(now, ttl));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_identical_requests_share_key() {
        let a = json!({"purchasePrice": 350000, "propertyType": "condo"});
        let b = json!({"purchasePrice": 350000, "propertyType": "condo"});
        let c = json!({"purchasePrice": 350001, "propertyType": "condo"});

        assert_eq!(cache_key(&a).unwrap(), cache_key(&b).unwrap());
        assert_ne!(cache_key(&a).unwrap(), cache_key(&c).unwrap());
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let start = Instant::now();
        let mut cache = AnalysisCache::new(Duration::from_secs(60));
        let key = cache_key(&"request").unwrap();

        cache.insert(key, 42_u32, start);
        assert_eq!(cache.get(key, start + Duration::from_secs(59)), Some(42));
        assert_eq!(cache.get(key, start + Duration::from_secs(60)), None);
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_get_or_try_insert_with() {
        let now = Instant::now();
        let mut cache: AnalysisCache<u32> = AnalysisCache::new(Duration::from_secs(60));
        let key = cache_key(&1).unwrap();

        let first: Result<u32, String> = cache.get_or_try_insert_with(key, now, || Ok(7));
        assert_eq!(first, Ok(7));

        // Cached value wins; the closure is not consulted
        let second: Result<u32, String> = cache.get_or_try_insert_with(key, now, || Err("recomputed".to_string()));
        assert_eq!(second, Ok(7));

        let other = cache_key(&2).unwrap();
        let failed: Result<u32, String> = cache.get_or_try_insert_with(other, now, || Err("bad input".to_string()));
        assert!(failed.is_err());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_purge_expired() {
        let start = Instant::now();
        let mut cache = AnalysisCache::new(Duration::from_secs(10));
        cache.insert(cache_key(&"old").unwrap(), 1_u32, start);
        cache.insert(cache_key(&"new").unwrap(), 2_u32, start + Duration::from_secs(8));

        assert_eq!(cache.purge_expired(start + Duration::from_secs(12)), 1);
        assert_eq!(cache.len(), 1);
    }
}
