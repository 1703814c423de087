//! Read-through/write-through cache layer

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::key::CacheKey;
use crate::error::StoreError;
use crate::store::{CacheRecord, CacheStore};

/// The cache surface the engines and embedders share
///
/// `get`/`put` are fail-open: a store outage logs and behaves like a miss
/// or dropped write. The `try_` variants surface [`StoreError`] for callers
/// that need to tell an outage from a miss.
#[derive(Clone)]
pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
}

impl CacheLayer {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read a live value, or `None` on miss/expiry
    ///
    /// A hit bumps `hit_count` and `last_accessed` on a spawned task so the
    /// read path never waits on accounting.
    pub async fn get(&self, key: &CacheKey) -> Option<Value> {
        match self.try_get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("cache read failed for {key}: {e}");
                None
            }
        }
    }

    /// Read a live value, surfacing store errors
    pub async fn try_get(&self, key: &CacheKey) -> Result<Option<Value>, StoreError> {
        let namespace = key.namespace();
        let rendered = key.render();

        match self.store.get(namespace, &rendered).await? {
            Some(record) if !record.is_expired_at(Utc::now()) => {
                let store = Arc::clone(&self.store);
                tokio::spawn(async move {
                    if let Err(e) = store.increment_hit(namespace, &rendered).await {
                        warn!("cache hit accounting failed for {rendered}: {e}");
                    }
                });
                Ok(Some(record.payload))
            }
            Some(_) => {
                // Expired-but-present is indistinguishable from absent
                debug!("cache entry expired for {rendered}");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Write a value with the given TTL, swallowing store errors
    pub async fn put(&self, key: &CacheKey, value: Value, ttl: Duration) {
        if let Err(e) = self.try_put(key, value, ttl).await {
            warn!("cache write failed for {key}: {e}");
        }
    }

    /// Write a value with the given TTL, surfacing store errors
    ///
    /// Upsert is destructive: an existing record is replaced wholesale and
    /// its hit count resets to zero.
    pub async fn try_put(
        &self,
        key: &CacheKey,
        value: Value,
        ttl: Duration,
    ) -> Result<(), StoreError> {
        let record = CacheRecord::new(value, Utc::now() + ttl);
        self.store.put(key.namespace(), &key.render(), record).await
    }

    /// Delete expired records across all namespaces, returning the count
    ///
    /// Intended for an external scheduler; reads never depend on it.
    pub async fn sweep_expired(&self) -> Result<u64, StoreError> {
        self.store.delete_expired(Utc::now()).await
    }
}
