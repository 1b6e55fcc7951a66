//! Context cache client for typed shopper context storage.
//!
//! This client wraps a generic `Cache` with:
//! - Key translation: `ContextKey` → `"context:{site_id}:{usid}"`
//! - JSON (de)serialization of `ShopperContext` bodies
//! - Metrics injection: cache hit/miss reporting
//!
//! Cache faults degrade to misses; they are logged, never surfaced.

use std::sync::Arc;

use tracing::warn;

use crate::cache::traits::Cache;
use crate::context::{ContextKey, ShopperContext};
use crate::metrics::SdkMetrics;

/// Cache client for shopper context storage.
///
/// Translates `ContextKey` to cache keys and optionally reports metrics on
/// cache hits and misses.
pub struct ContextCacheClient {
    /// The underlying generic cache.
    cache: Arc<dyn Cache>,

    /// Optional metrics collector for hit/miss reporting.
    metrics: Option<Arc<SdkMetrics>>,
}

impl ContextCacheClient {
    /// Create a new context cache client without metrics.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            metrics: None,
        }
    }

    /// Create a new context cache client with metrics.
    ///
    /// # Arguments
    ///
    /// * `cache` - The underlying cache implementation
    /// * `metrics` - Metrics collector for reporting
    pub fn with_metrics(cache: Arc<dyn Cache>, metrics: Arc<SdkMetrics>) -> Self {
        Self {
            cache,
            metrics: Some(metrics),
        }
    }

    /// Get a cached context.
    ///
    /// Reports cache hit/miss to metrics if configured.
    ///
    /// # Returns
    ///
    /// `Some(context)` if cached and decodable, `None` otherwise
    pub async fn get(&self, key: &ContextKey) -> Option<ShopperContext> {
        let cache_key = key.cache_key();
        match self.cache.get(&cache_key).await {
            Ok(Some(data)) => match serde_json::from_slice(&data) {
                Ok(context) => {
                    if let Some(ref m) = self.metrics {
                        m.cache_hit();
                    }
                    Some(context)
                }
                Err(e) => {
                    // Undecodable entries are stale garbage; drop them.
                    warn!(error = %e, key = %cache_key, "Evicting undecodable cache entry");
                    let _ = self.cache.delete(&cache_key).await;
                    if let Some(ref m) = self.metrics {
                        m.cache_miss();
                    }
                    None
                }
            },
            Ok(None) => {
                if let Some(ref m) = self.metrics {
                    m.cache_miss();
                }
                None
            }
            Err(e) => {
                warn!(error = %e, key = %cache_key, "Context cache get failed");
                if let Some(ref m) = self.metrics {
                    m.cache_miss();
                }
                None
            }
        }
    }

    /// Store a context.
    pub async fn put(&self, key: &ContextKey, context: &ShopperContext) {
        let cache_key = key.cache_key();
        let data = match serde_json::to_vec(context) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, key = %cache_key, "Failed to encode context for cache");
                return;
            }
        };
        if let Err(e) = self.cache.set(&cache_key, data).await {
            warn!(error = %e, key = %cache_key, "Context cache put failed");
        }
    }

    /// Remove a context.
    ///
    /// # Returns
    ///
    /// `true` if an entry existed
    pub async fn invalidate(&self, key: &ContextKey) -> bool {
        let cache_key = key.cache_key();
        match self.cache.delete(&cache_key).await {
            Ok(existed) => existed,
            Err(e) => {
                warn!(error = %e, key = %cache_key, "Context cache invalidate failed");
                false
            }
        }
    }
}
