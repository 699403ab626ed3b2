//! Cached Fetch
//!
//! The one path every cacheable route goes through: serve a fresh cached
//! document if there is one, otherwise ask upstream and remember the answer.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::SharedCache;
use crate::error::UpstreamError;
use crate::upstream::{Upstream, UpstreamRequest};

/// Cache-augmented front of an [`Upstream`].
///
/// Concurrent misses on the same key each call upstream; the last write wins.
#[derive(Clone)]
pub struct CachedFetcher {
    cache: SharedCache,
    upstream: Arc<dyn Upstream>,
    ttl: Duration,
}

impl CachedFetcher {
    pub fn new(cache: SharedCache, upstream: Arc<dyn Upstream>, ttl: Duration) -> Self {
        Self {
            cache,
            upstream,
            ttl,
        }
    }

    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the document cached under `key`, fetching and caching it on a miss.
    ///
    /// Failures are returned unchanged and leave the cache untouched.
    pub async fn fetch_with_cache(
        &self,
        key: &str,
        request: &UpstreamRequest,
    ) -> Result<Value, UpstreamError> {
        // Hits take the write lock too: a read reorders the LRU and bumps the
        // hit counter. The lock is held only for the map lookup, never across
        // the upstream call.
        let cached = self.cache.write().await.get(key);
        if let Some(value) = cached {
            debug!(key, "cache hit");
            return Ok(value);
        }

        debug!(key, url = %request.url, "cache miss");
        let value = self.upstream.get(request).await?;

        self.cache
            .write()
            .await
            .set(key.to_string(), value.clone(), self.ttl);

        Ok(value)
    }

    /// Calls upstream directly, bypassing the cache in both directions.
    pub async fn fetch_uncached(&self, request: &UpstreamRequest) -> Result<Value, UpstreamError> {
        self.upstream.get(request).await
    }
}
