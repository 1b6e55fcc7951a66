//! In-memory cache provider using moka.
//!
//! This provider wraps `moka::future::Cache` to provide an async-safe,
//! lock-free in-memory cache with automatic LRU eviction.
//!
//! # Why moka?
//!
//! - Lock-free reads (common case)
//! - Concurrent writes without blocking
//! - Automatic LRU eviction without explicit locking
//! - Memory-bounded with configurable limits
//! - Designed for async contexts

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::cache::traits::{BoxFuture, Cache, CacheError, MAX_KEY_BYTES};

/// In-memory cache provider using moka.
///
/// Provides fast, async-safe access to cached response data with automatic
/// LRU eviction. The underlying moka cache uses lock-free data structures,
/// making it safe for use across multiple async tasks.
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: MokaCache<String, Vec<u8>>,

    /// Maximum size in bytes.
    max_size_bytes: u64,
}

impl MemoryCacheProvider {
    /// Create a new memory cache provider.
    ///
    /// # Arguments
    ///
    /// * `max_size_bytes` - Maximum cache size in bytes
    /// * `ttl` - Optional time-to-live for entries
    pub fn new(max_size_bytes: u64, ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder()
            // Weight each entry by its data size
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                // moka uses u32 for weights, cap at u32::MAX for very large entries
                value.len().min(u32::MAX as usize) as u32
            })
            // Maximum total weight (size in bytes)
            .max_capacity(max_size_bytes);

        if let Some(ttl_duration) = ttl {
            builder = builder.time_to_live(ttl_duration);
        }

        Self {
            cache: builder.build(),
            max_size_bytes,
        }
    }

    fn check_key(key: &str) -> Result<(), CacheError> {
        if key.len() > MAX_KEY_BYTES {
            return Err(CacheError::KeyTooLarge {
                size: key.len(),
                max: MAX_KEY_BYTES,
            });
        }
        Ok(())
    }
}

impl Cache for MemoryCacheProvider {
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            Self::check_key(&key)?;
            self.cache.insert(key, value).await;
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.get(&key).await) })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            let existed = self.cache.contains_key(&key);
            self.cache.remove(&key).await;
            Ok(existed)
        })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.contains_key(&key)) })
    }

    fn clear(&self) -> BoxFuture<'_, Result<(), CacheError>> {
        Box::pin(async move {
            self.cache.invalidate_all();
            self.cache.run_pending_tasks().await;
            Ok(())
        })
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    fn size_bytes(&self) -> u64 {
        self.cache.weighted_size()
    }

    fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCacheProvider::new(1024, None);
        cache.set("a", vec![1, 2, 3]).await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(cache.get("b").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let cache = MemoryCacheProvider::new(1024, None);
        cache.set("a", vec![1]).await.unwrap();
        assert!(cache.delete("a").await.unwrap());
        assert!(!cache.delete("a").await.unwrap());
    }

    #[tokio::test]
    async fn test_contains() {
        let cache = MemoryCacheProvider::new(1024, None);
        cache.set("a", vec![1]).await.unwrap();
        assert!(cache.contains("a").await.unwrap());
        assert!(!cache.contains("b").await.unwrap());
    }

    #[tokio::test]
    async fn test_clear_empties_cache() {
        let cache = MemoryCacheProvider::new(1024, None);
        cache.set("a", vec![1]).await.unwrap();
        cache.set("b", vec![2]).await.unwrap();
        cache.clear().await.unwrap();
        assert_eq!(cache.entry_count(), 0);
        assert_eq!(cache.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_oversized_key_rejected() {
        let cache = MemoryCacheProvider::new(1024, None);
        let key = "k".repeat(MAX_KEY_BYTES + 1);
        let result = cache.set(&key, vec![1]).await;
        assert!(matches!(result, Err(CacheError::KeyTooLarge { .. })));
    }

    #[tokio::test]
    async fn test_ttl_expires_entries() {
        let cache = MemoryCacheProvider::new(1024, Some(Duration::from_millis(20)));
        cache.set("a", vec![1]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_max_size_reported() {
        let cache = MemoryCacheProvider::new(4096, None);
        assert_eq!(cache.max_size_bytes(), 4096);
    }
}
