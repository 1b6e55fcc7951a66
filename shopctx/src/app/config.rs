//! Application configuration for ShopCtxApp.
//!
//! `AppConfig` combines everything needed to bootstrap the SDK: the typed
//! client configuration and memory cache sizing.

use std::time::Duration;

use crate::client::ClientConfig;
use crate::config::{ConfigFile, DEFAULT_CACHE_TTL_SECS, DEFAULT_MEMORY_CACHE_SIZE};

/// Memory cache configuration for the application.
#[derive(Clone, Debug)]
pub struct MemoryCacheAppConfig {
    /// Maximum cache size in bytes.
    pub max_size_bytes: u64,

    /// Entry TTL; `None` disables expiry.
    pub ttl: Option<Duration>,
}

impl Default for MemoryCacheAppConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MEMORY_CACHE_SIZE as u64,
            ttl: Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
        }
    }
}

/// Application configuration combining all component configs.
///
/// This is the top-level configuration passed to `ShopCtxApp::start()`.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    /// Typed client configuration.
    pub client: ClientConfig,

    /// Memory cache configuration.
    pub memory_cache: MemoryCacheAppConfig,
}

impl AppConfig {
    /// Create an application config from a loaded configuration file.
    ///
    /// Keeps the file-to-runtime translation in one place rather than
    /// scattered in CLI code.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let ttl = match config.cache.ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };
        Self {
            client: config.to_client_config(),
            memory_cache: MemoryCacheAppConfig {
                max_size_bytes: config.cache.memory_size as u64,
                ttl,
            },
        }
    }

    /// Set the memory cache size.
    pub fn with_memory_cache_size(mut self, max_size_bytes: u64) -> Self {
        self.memory_cache.max_size_bytes = max_size_bytes;
        self
    }
}
