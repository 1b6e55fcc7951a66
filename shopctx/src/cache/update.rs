//! Cache-update model: the operations a mutation applies to the cache.
//!
//! A cache-update getter computes a [`CacheUpdate`] - an ordered list of
//! [`CacheOp`]s - from a mutation's options and result data. The update is
//! applied to the generic cache after the mutation succeeds server-side.

use tracing::debug;

use crate::cache::traits::{Cache, CacheError};
use crate::context::ShopperContext;

/// A single operation against the cache.
#[derive(Clone, Debug, PartialEq)]
pub enum CacheOp {
    /// Store a fresh copy of the resource under `key`.
    Put {
        /// Cache key to write.
        key: String,
        /// The resource body to store.
        context: ShopperContext,
    },

    /// Remove whatever is cached under `key`.
    Invalidate {
        /// Cache key to remove.
        key: String,
    },
}

impl CacheOp {
    /// Returns the cache key this op targets.
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } => key,
            Self::Invalidate { key } => key,
        }
    }
}

/// An ordered list of cache operations computed for one mutation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CacheUpdate {
    ops: Vec<CacheOp>,
}

impl CacheUpdate {
    /// Creates an empty update (a no-op when applied).
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an update with a single `Put` op.
    pub fn put(key: impl Into<String>, context: ShopperContext) -> Self {
        Self {
            ops: vec![CacheOp::Put {
                key: key.into(),
                context,
            }],
        }
    }

    /// Creates an update with a single `Invalidate` op.
    pub fn invalidate(key: impl Into<String>) -> Self {
        Self {
            ops: vec![CacheOp::Invalidate { key: key.into() }],
        }
    }

    /// Appends an op.
    pub fn push(&mut self, op: CacheOp) {
        self.ops.push(op);
    }

    /// The ops in application order.
    pub fn ops(&self) -> &[CacheOp] {
        &self.ops
    }

    /// Number of ops.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns true if applying this update would do nothing.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Applies every op to the cache, in order.
    ///
    /// # Returns
    ///
    /// The number of ops applied, or the first error encountered.
    pub async fn apply(&self, cache: &dyn Cache) -> Result<u64, CacheError> {
        let mut applied = 0u64;
        for op in &self.ops {
            match op {
                CacheOp::Put { key, context } => {
                    let data = serde_json::to_vec(context)
                        .map_err(|e| CacheError::Provider(format!("encode failed: {}", e)))?;
                    cache.set(key, data).await?;
                    debug!(key = %key, "Cache put applied");
                }
                CacheOp::Invalidate { key } => {
                    cache.delete(key).await?;
                    debug!(key = %key, "Cache invalidate applied");
                }
            }
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::providers::MemoryCacheProvider;
    use crate::context::ContextKey;

    #[tokio::test]
    async fn test_apply_put_then_get() {
        let cache = Arc::new(MemoryCacheProvider::new(1024 * 1024, None));
        let key = ContextKey::new("usid-1", "RefArch").cache_key();

        let update = CacheUpdate::put(key.clone(), ShopperContext::default());
        assert_eq!(update.apply(cache.as_ref()).await.unwrap(), 1);
        assert!(cache.contains(&key).await.unwrap());
    }

    #[tokio::test]
    async fn test_apply_invalidate_removes_entry() {
        let cache = Arc::new(MemoryCacheProvider::new(1024 * 1024, None));
        let key = "context:RefArch:usid-1";
        cache.set(key, b"{}".to_vec()).await.unwrap();

        let update = CacheUpdate::invalidate(key);
        update.apply(cache.as_ref()).await.unwrap();
        assert!(!cache.contains(key).await.unwrap());
    }

    #[tokio::test]
    async fn test_apply_preserves_order() {
        let cache = Arc::new(MemoryCacheProvider::new(1024 * 1024, None));
        let key = "context:RefArch:usid-1";

        // Put then invalidate: the entry must end up absent.
        let mut update = CacheUpdate::put(key, ShopperContext::default());
        update.push(CacheOp::Invalidate { key: key.into() });
        assert_eq!(update.apply(cache.as_ref()).await.unwrap(), 2);
        assert!(!cache.contains(key).await.unwrap());
    }

    #[test]
    fn test_none_is_empty() {
        assert!(CacheUpdate::none().is_empty());
        assert_eq!(CacheUpdate::none().len(), 0);
    }
}
