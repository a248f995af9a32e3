// src/infrastructure/cache.rs
use crate::application::ports::{cache::QueryCache, time::Clock};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

struct CacheEntry {
    value: Value,
    expires_at: DateTime<Utc>,
}

/// Process-local TTL cache for query results.
///
/// Expired entries are dropped lazily on read. The lock is never held across an await.
pub struct InMemoryQueryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryQueryCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned map only ever holds plain JSON, so keep serving it.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl QueryCache for InMemoryQueryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let now = self.clock.now();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                tracing::debug!(key, "cache entry expired");
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return;
        };
        let expires_at = self.clock.now() + ttl;
        self.lock()
            .insert(key.to_owned(), CacheEntry { value, expires_at });
    }

    fn invalidate(&self, key: &str) {
        if self.lock().remove(key).is_some() {
            tracing::debug!(key, "cache entry invalidated");
        }
    }

    fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        tracing::debug!(prefix, dropped = before - entries.len(), "cache prefix invalidated");
    }
}

/// Cache that never stores anything; every read falls through to the repository.
#[derive(Default, Clone)]
pub struct NoopQueryCache;

impl QueryCache for NoopQueryCache {
    fn get(&self, _key: &str) -> Option<Value> {
        None
    }

    fn set(&self, _key: &str, _value: Value, _ttl: Duration) {}

    fn invalidate(&self, _key: &str) {}

    fn invalidate_prefix(&self, _prefix: &str) {}
}
