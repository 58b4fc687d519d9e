//! Shared cache pool.
//!
//! Key → JSON value map with a per-item expiry. Used by the Packagist helper
//! to avoid hitting the API on every status page render.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone)]
struct CacheItem {
    value: serde_json::Value,
    expires_at: Option<Instant>,
}

impl CacheItem {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// A thread-safe cache pool.
#[derive(Debug, Clone, Default)]
pub struct CachePool {
    inner: Arc<DashMap<String, CacheItem>>,
}

impl CachePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a fresh item. Expired or undecodable items are evicted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let now = Instant::now();
        let value = {
            let item = self.inner.get(key)?;
            item.is_fresh(now).then(|| item.value.clone())
        };

        let Some(value) = value else {
            self.inner.remove(key);
            tracing::trace!(key, "Cache item expired");
            return None;
        };

        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(key, error = %e, "Dropping undecodable cache item");
                self.inner.remove(key);
                None
            }
        }
    }

    /// Store an item. `None` keeps it until deleted.
    pub fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> Result<(), serde_json::Error> {
        let item = CacheItem {
            value: serde_json::to_value(value)?,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.inner.insert(key.to_string(), item);
        Ok(())
    }

    /// Whether a fresh item exists for `key`.
    pub fn has(&self, key: &str) -> bool {
        self.inner
            .get(key)
            .map(|item| item.is_fresh(Instant::now()))
            .unwrap_or(false)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Number of stored items, fresh or not.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
