//! TTL-bounded validation cache for API keys.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use userdir_core::ApiKey;

/// One memoized validation result.
#[derive(Debug, Clone)]
struct CacheEntry {
    key: ApiKey,
    expires_at: Instant,
}

/// Concurrency-safe map from key hash to a previously validated record.
///
/// Entries are honored only while the current time is strictly before their
/// expiry instant; an expired entry is a miss and is evicted lazily by the
/// next write to the same hash. Reads take the shared lock, writes the
/// exclusive lock, and no path upgrades one to the other.
#[derive(Debug, Default)]
pub struct ValidationCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl ValidationCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached record for `hash`, or `None` on a miss.
    #[must_use]
    pub fn get(&self, hash: &str) -> Option<ApiKey> {
        let entries = self.entries.read();
        let entry = entries.get(hash)?;
        if Instant::now() >= entry.expires_at {
            // Stale entry, dropped on the next write to this hash.
            return None;
        }
        Some(entry.key.clone())
    }

    /// Stores `key` under `hash` with expiry `now + ttl`, overwriting any
    /// existing entry.
    ///
    /// A TTL that has already elapsed at write time (a zero TTL) removes the
    /// hash instead of storing an entry that would be born expired.
    pub fn put(&self, hash: &str, key: ApiKey, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now + ttl;

        let mut entries = self.entries.write();
        if expires_at <= now {
            entries.remove(hash);
            return;
        }
        entries.insert(hash.to_string(), CacheEntry { key, expires_at });
    }

    /// Number of stored entries, expired or not. Test hook.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
