//! The Shopper Contexts resource API: mutation adapter and read path.
//!
//! [`ShopperContextsApi::mutation`] is the factory wiring a named mutation
//! to (a) the matching typed client method and (b) the cache-update getter
//! registered for it in [`crate::cache::matrix`]. Resolution happens fully
//! before any network-capable state exists: a name without a registered
//! getter fails with [`MutationError::NotImplemented`] and no client method
//! is ever bound.

use std::sync::Arc;

use crate::cache::{matrix, Cache, ContextCacheClient};
use crate::client::{ClientError, ShopperContextsClient};
use crate::context::{GetContextOptions, ShopperContext};
use crate::metrics::SdkMetrics;

use super::error::MutationError;
use super::executor::{BoundMethod, MutationHandle};
use super::operation::{MutationOperation, MutationPayload};

/// Access point for the Shopper Contexts resource family.
///
/// Cheap to clone; all fields are shared.
#[derive(Clone)]
pub struct ShopperContextsApi {
    client: Arc<ShopperContextsClient>,
    cache: Arc<dyn Cache>,
    metrics: Arc<SdkMetrics>,
}

impl ShopperContextsApi {
    /// Creates the resource API over a typed client and a cache.
    pub fn new(
        client: Arc<ShopperContextsClient>,
        cache: Arc<dyn Cache>,
        metrics: Arc<SdkMetrics>,
    ) -> Self {
        Self {
            client,
            cache,
            metrics,
        }
    }

    /// The underlying typed client.
    pub fn client(&self) -> &Arc<ShopperContextsClient> {
        &self.client
    }

    /// Returns a mutation handle for a named operation.
    ///
    /// # Arguments
    ///
    /// * `operation` - Backend operation identifier, e.g.
    ///   `"createShopperContext"`
    ///
    /// # Errors
    ///
    /// [`MutationError::NotImplemented`] if the name has no registered
    /// cache-update getter. Raised synchronously; no client method is called.
    pub fn mutation(&self, operation: &str) -> Result<MutationHandle, MutationError> {
        let op = MutationOperation::parse(operation).ok_or_else(|| {
            MutationError::NotImplemented {
                operation: operation.to_string(),
            }
        })?;
        let get_cache_updates =
            matrix::cache_update_getter(op).ok_or_else(|| MutationError::NotImplemented {
                operation: operation.to_string(),
            })?;

        Ok(MutationHandle::new(
            op,
            self.bind_method(op),
            get_cache_updates,
            Arc::clone(&self.cache),
            Arc::clone(&self.metrics),
        ))
    }

    /// Reads a shopper context, serving from cache when possible.
    ///
    /// A miss fetches from the server and populates the cache.
    pub async fn get(&self, options: &GetContextOptions) -> Result<ShopperContext, ClientError> {
        let cache_client = self.context_cache();
        if let Some(context) = cache_client.get(&options.key).await {
            return Ok(context);
        }

        let context = self.client.get_shopper_context(options).await?;
        cache_client.put(&options.key, &context).await;
        Ok(context)
    }

    /// The typed cache client for this resource.
    pub fn context_cache(&self) -> ContextCacheClient {
        ContextCacheClient::with_metrics(Arc::clone(&self.cache), Arc::clone(&self.metrics))
    }

    /// Binds the typed client method matching an operation.
    ///
    /// The returned closure checks that the trigger payload belongs to the
    /// bound operation and delegates to the client. Result data is `Some`
    /// for create/update and `None` for delete (bodyless response).
    fn bind_method(&self, operation: MutationOperation) -> BoundMethod {
        let client = Arc::clone(&self.client);
        Arc::new(move |payload: MutationPayload| {
            let client = Arc::clone(&client);
            Box::pin(async move {
                match (operation, payload) {
                    (MutationOperation::CreateShopperContext, MutationPayload::Create(options)) => {
                        Ok(Some(client.create_shopper_context(&options).await?))
                    }
                    (MutationOperation::UpdateShopperContext, MutationPayload::Update(options)) => {
                        Ok(Some(client.update_shopper_context(&options).await?))
                    }
                    (MutationOperation::DeleteShopperContext, MutationPayload::Delete(options)) => {
                        client.delete_shopper_context(&options).await?;
                        Ok(None)
                    }
                    (operation, payload) => Err(MutationError::PayloadMismatch {
                        operation,
                        payload: payload.operation(),
                    }),
                }
            })
        })
    }
}
