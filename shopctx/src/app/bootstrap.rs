//! SDK bootstrap: wires transport, cache, and metrics into one handle.

use std::sync::Arc;

use tracing::info;

use crate::cache::{Cache, ContextCacheClient, MemoryCacheProvider};
use crate::client::{HttpClient, ReqwestClient, ShopperContextsClient};
use crate::metrics::{MetricsSnapshot, SdkMetrics};
use crate::mutation::ShopperContextsApi;

use super::config::AppConfig;
use super::error::AppError;

/// The assembled SDK: owns the transport, the response cache, and metrics.
///
/// Obtain resource access points from it; the app itself holds no request
/// state and is cheap to share behind an `Arc`.
pub struct ShopCtxApp {
    config: AppConfig,
    http: Arc<dyn HttpClient>,
    cache: Arc<dyn Cache>,
    metrics: Arc<SdkMetrics>,
}

impl ShopCtxApp {
    /// Starts the SDK with a reqwest-backed transport.
    ///
    /// # Arguments
    ///
    /// * `config` - Combined client and cache configuration
    pub fn start(config: AppConfig) -> Result<Self, AppError> {
        let http = ReqwestClient::with_timeout(config.client.timeout)
            .map(|client| Arc::new(client) as Arc<dyn HttpClient>)
            .map_err(AppError::HttpClient)?;
        Self::with_http_client(config, http)
    }

    /// Starts the SDK over an injected transport (tests, instrumentation).
    pub fn with_http_client(
        config: AppConfig,
        http: Arc<dyn HttpClient>,
    ) -> Result<Self, AppError> {
        config.client.validate().map_err(AppError::ClientCreation)?;

        let cache: Arc<dyn Cache> = Arc::new(MemoryCacheProvider::new(
            config.memory_cache.max_size_bytes,
            config.memory_cache.ttl,
        ));
        info!(
            cache_size = config.memory_cache.max_size_bytes,
            site_id = %config.client.site_id,
            "ShopCtx SDK started"
        );

        Ok(Self {
            config,
            http,
            cache,
            metrics: Arc::new(SdkMetrics::new()),
        })
    }

    /// The configuration the app was started with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Access point for the Shopper Contexts resource family.
    pub fn shopper_contexts(&self) -> Result<ShopperContextsApi, AppError> {
        let client = ShopperContextsClient::new(Arc::clone(&self.http), self.config.client.clone())
            .map_err(AppError::ClientCreation)?;
        Ok(ShopperContextsApi::new(
            Arc::new(client),
            Arc::clone(&self.cache),
            Arc::clone(&self.metrics),
        ))
    }

    /// The typed context cache client.
    pub fn context_cache(&self) -> ContextCacheClient {
        ContextCacheClient::with_metrics(Arc::clone(&self.cache), Arc::clone(&self.metrics))
    }

    /// The underlying generic cache.
    pub fn cache(&self) -> &Arc<dyn Cache> {
        &self.cache
    }

    /// Point-in-time metrics.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
