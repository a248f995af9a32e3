use std::{future::Future, time::Duration};

use serde::{Serialize, de::DeserializeOwned};

use crate::application::{error::ApplicationResult, ports::cache::QueryCache};

/// Returns the cached value for `key`, or runs `load` and stores its result for `ttl`.
///
/// The stored form is the serialized JSON, so a hit reproduces the original response exactly.
/// An entry that no longer decodes is treated as a miss.
pub(crate) async fn cached<T, F, Fut>(
    cache: &dyn QueryCache,
    key: &str,
    ttl: Duration,
    load: F,
) -> ApplicationResult<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApplicationResult<T>>,
{
    if let Some(value) = cache.get(key) {
        match serde_json::from_value::<T>(value) {
            Ok(hit) => {
                tracing::debug!(key, "query cache hit");
                return Ok(hit);
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding undecodable cache entry");
                cache.invalidate(key);
            }
        }
    }

    tracing::debug!(key, "query cache miss");
    let fresh = load().await?;
    match serde_json::to_value(&fresh) {
        Ok(value) => cache.set(key, value, ttl),
        Err(err) => tracing::warn!(key, error = %err, "query result not cacheable"),
    }
    Ok(fresh)
}
