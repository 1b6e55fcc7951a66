//! Cache-aware mutations for the Shopper Contexts resource.
//!
//! The flow mirrors the three collaborators it is built from:
//!
//! 1. [`MutationOperation`] - the closed registry of named mutations
//! 2. [`crate::cache::matrix`] - the lookup table of cache-update getters
//! 3. [`MutationHandle`] - the generic executor producing triggerable,
//!    stateful handles
//!
//! [`ShopperContextsApi::mutation`] is the adapter tying them together.

mod api;
mod error;
mod executor;
mod operation;

pub use api::ShopperContextsApi;
pub use error::MutationError;
pub use executor::{BoundMethod, MutationHandle, MutationStatus};
pub use operation::{MutationOperation, MutationPayload};
