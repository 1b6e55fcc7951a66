//! Client-side response cache for Shopper Contexts.
//!
//! Three layers, bottom up:
//!
//! - [`Cache`] - generic string-key/byte-value interface with the moka-backed
//!   [`MemoryCacheProvider`] behind it
//! - [`ContextCacheClient`] - typed decorator translating [`ContextKey`]s and
//!   JSON bodies
//! - [`matrix`] - the cache-update lookup table mapping each mutation to the
//!   [`CacheUpdateGetter`] that computes post-mutation cache operations
//!
//! [`ContextKey`]: crate::context::ContextKey

mod client;
pub mod matrix;
pub mod providers;
mod traits;
mod update;

pub use client::ContextCacheClient;
pub use matrix::{cache_update_getter, CacheUpdateGetter};
pub use providers::MemoryCacheProvider;
pub use traits::{BoxFuture, Cache, CacheError, MAX_KEY_BYTES};
pub use update::{CacheOp, CacheUpdate};
