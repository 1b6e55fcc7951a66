//! Cache-update lookup table for Shopper Contexts mutations.
//!
//! Maps each mutation to the function computing which cached entries to
//! adjust after that mutation succeeds. The table is a static registry
//! queried by exact key match at adapter time - an operation without an
//! entry is reported as not implemented by the adapter, before any network
//! interaction.

use crate::cache::update::CacheUpdate;
use crate::context::ShopperContext;
use crate::mutation::{MutationOperation, MutationPayload};

/// A pure function computing the cache operations for one finished mutation.
///
/// Receives the payload the mutation was triggered with and the result data
/// the server returned (absent for bodyless responses such as delete).
pub type CacheUpdateGetter = fn(&MutationPayload, Option<&ShopperContext>) -> CacheUpdate;

/// Create and update both leave a fresh server-confirmed copy in the cache.
/// Without result data there is nothing trustworthy to store, so the stale
/// entry is invalidated instead.
fn upsert_updates(payload: &MutationPayload, data: Option<&ShopperContext>) -> CacheUpdate {
    let key = payload.context_key().cache_key();
    match data {
        Some(context) => CacheUpdate::put(key, context.clone()),
        None => CacheUpdate::invalidate(key),
    }
}

fn delete_updates(payload: &MutationPayload, _data: Option<&ShopperContext>) -> CacheUpdate {
    CacheUpdate::invalidate(payload.context_key().cache_key())
}

/// The registry: one getter per implemented mutation.
const MATRIX: &[(MutationOperation, CacheUpdateGetter)] = &[
    (MutationOperation::CreateShopperContext, upsert_updates),
    (MutationOperation::UpdateShopperContext, upsert_updates),
    (MutationOperation::DeleteShopperContext, delete_updates),
];

/// Looks up the cache-update getter registered for an operation.
///
/// # Returns
///
/// `None` if the operation has no registered getter.
pub fn cache_update_getter(operation: MutationOperation) -> Option<CacheUpdateGetter> {
    MATRIX
        .iter()
        .find(|(op, _)| *op == operation)
        .map(|(_, getter)| *getter)
}
