//! Generic mutation executor.
//!
//! A [`MutationHandle`] represents one triggerable, stateful asynchronous
//! operation: a bound client method plus the cache-update getter for its
//! operation. Triggering runs the method, applies the computed cache update
//! on success, and records observable state.
//!
//! # State Model
//!
//! ```text
//! Idle ──trigger──► Pending ──► Success
//!                      │
//!                      └──────► Error
//! ```
//!
//! Concurrent triggers on one handle are serialized (single logical
//! operation per trigger); handles are independent of each other and hold no
//! shared locks.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cache::{Cache, CacheUpdateGetter};
use crate::context::ShopperContext;
use crate::metrics::SdkMetrics;

use super::error::MutationError;
use super::operation::{MutationOperation, MutationPayload};

/// A client method bound to one operation, ready to invoke with a payload.
///
/// Produced by the adapter; returns the mutation's result data (absent for
/// bodyless responses such as delete).
pub type BoundMethod = Arc<
    dyn Fn(
            MutationPayload,
        )
            -> Pin<Box<dyn Future<Output = Result<Option<ShopperContext>, MutationError>> + Send>>
        + Send
        + Sync,
>;

/// Observable state of a mutation handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MutationStatus {
    /// Never triggered.
    #[default]
    Idle,
    /// A trigger is in flight.
    Pending,
    /// The last trigger succeeded.
    Success,
    /// The last trigger failed.
    Error,
}

/// Last-trigger outcome, guarded by one short-lived lock.
#[derive(Default)]
struct LastOutcome {
    data: Option<ShopperContext>,
    error: Option<MutationError>,
}

/// Execution handle for one named mutation.
///
/// Returned by the adapter; see
/// [`ShopperContextsApi::mutation`](crate::mutation::ShopperContextsApi::mutation).
pub struct MutationHandle {
    operation: MutationOperation,
    method: BoundMethod,
    get_cache_updates: CacheUpdateGetter,
    cache: Arc<dyn Cache>,
    metrics: Arc<SdkMetrics>,
    status: watch::Sender<MutationStatus>,
    last: Mutex<LastOutcome>,
    flight: tokio::sync::Mutex<()>,
}

impl MutationHandle {
    /// Creates a handle wired to a bound method and cache-update getter.
    pub(crate) fn new(
        operation: MutationOperation,
        method: BoundMethod,
        get_cache_updates: CacheUpdateGetter,
        cache: Arc<dyn Cache>,
        metrics: Arc<SdkMetrics>,
    ) -> Self {
        let (status, _) = watch::channel(MutationStatus::Idle);
        Self {
            operation,
            method,
            get_cache_updates,
            cache,
            metrics,
            status,
            last: Mutex::new(LastOutcome::default()),
            flight: tokio::sync::Mutex::new(()),
        }
    }

    /// The operation this handle executes.
    pub fn operation(&self) -> MutationOperation {
        self.operation
    }

    /// The cache-update getter wired to this handle.
    pub fn cache_update_getter(&self) -> CacheUpdateGetter {
        self.get_cache_updates
    }

    /// Current status.
    pub fn status(&self) -> MutationStatus {
        *self.status.borrow()
    }

    /// Subscribes to status changes.
    pub fn subscribe(&self) -> watch::Receiver<MutationStatus> {
        self.status.subscribe()
    }

    /// Result data of the last successful trigger, if any.
    pub fn data(&self) -> Option<ShopperContext> {
        self.last.lock().data.clone()
    }

    /// Error of the last failed trigger, if any.
    pub fn error(&self) -> Option<MutationError> {
        self.last.lock().error.clone()
    }

    /// Runs one logical mutation.
    ///
    /// Invokes the bound client method; on success, computes the cache
    /// update for this operation and applies it. Concurrent triggers on the
    /// same handle queue behind an internal lock.
    ///
    /// A cache fault after a successful mutation does not fail the trigger;
    /// the server already accepted the change, so the fault is logged and
    /// counted instead.
    pub async fn trigger(
        &self,
        payload: MutationPayload,
    ) -> Result<Option<ShopperContext>, MutationError> {
        let _flight = self.flight.lock().await;

        self.metrics.mutation_started();
        self.status.send_replace(MutationStatus::Pending);
        debug!(operation = %self.operation, key = %payload.context_key(), "Mutation triggered");

        match (self.method)(payload.clone()).await {
            Ok(data) => {
                let update = (self.get_cache_updates)(&payload, data.as_ref());
                if !update.is_empty() {
                    match update.apply(self.cache.as_ref()).await {
                        Ok(applied) => self.metrics.cache_ops_applied(applied),
                        Err(e) => warn!(
                            operation = %self.operation,
                            error = %e,
                            "Cache update failed after successful mutation"
                        ),
                    }
                }

                {
                    let mut last = self.last.lock();
                    last.data = data.clone();
                    last.error = None;
                }
                self.status.send_replace(MutationStatus::Success);
                self.metrics.mutation_succeeded();
                Ok(data)
            }
            Err(e) => {
                {
                    let mut last = self.last.lock();
                    last.error = Some(e.clone());
                }
                self.status.send_replace(MutationStatus::Error);
                self.metrics.mutation_failed();
                debug!(operation = %self.operation, error = %e, "Mutation failed");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for MutationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationHandle")
            .field("operation", &self.operation)
            .field("status", &self.status())
            .finish()
    }
}
