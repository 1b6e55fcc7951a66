//! ShopCtx - Client SDK for the Shopper Contexts API
//!
//! This library wires named mutations on the Shopper Contexts resource to a
//! typed HTTP client and a client-side response cache. The central entry
//! point is the mutation adapter:
//!
//! ```ignore
//! use shopctx::{AppConfig, ShopCtxApp};
//! use shopctx::context::{ContextKey, CreateContextOptions, ShopperContext};
//! use shopctx::mutation::MutationPayload;
//!
//! let app = ShopCtxApp::start(AppConfig::from_config_file(&config))?;
//! let api = app.shopper_contexts()?;
//!
//! let handle = api.mutation("createShopperContext")?;
//! let payload = MutationPayload::Create(CreateContextOptions {
//!     key: ContextKey::new(usid, site_id),
//!     context: ShopperContext::default(),
//! });
//! let created = handle.trigger(payload).await?;
//! ```
//!
//! After a successful trigger, the cache-update getter registered for the
//! operation in [`cache::matrix`] decides which cached entries are refreshed
//! or invalidated.

pub mod app;
pub mod cache;
pub mod client;
pub mod config;
pub mod context;
pub mod log;
pub mod metrics;
pub mod mutation;

pub use app::{AppConfig, AppError, ShopCtxApp};
pub use mutation::{MutationError, MutationHandle, MutationOperation, MutationStatus};
