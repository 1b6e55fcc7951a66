//! API client layer for the Shopper Contexts resource.
//!
//! The transport is abstracted behind the [`HttpClient`] trait so the typed
//! [`ShopperContextsClient`] can be exercised against a mock in tests.

mod http;
mod shopper_contexts;
mod types;

pub use http::{HttpClient, ReqwestClient};
pub use shopper_contexts::ShopperContextsClient;
pub use types::{
    ClientConfig, ClientError, HttpMethod, HttpRequest, HttpResponse, DEFAULT_TIMEOUT_SECS,
};

#[cfg(test)]
pub use http::tests::MockHttpClient;
