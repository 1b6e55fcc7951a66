//! Shared types for the API client layer.

use std::time::Duration;

use thiserror::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur in the API client layer.
///
/// Carries rendered messages rather than source errors so values stay `Clone`
/// for last-error reporting on mutation handles.
#[derive(Clone, Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connect, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The request URL.
        url: String,
        /// Truncated response body for diagnostics.
        body: String,
    },

    /// Request or response body failed to (de)serialize.
    #[error("JSON error: {0}")]
    Json(String),

    /// The client was configured with unusable values.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}

/// HTTP verbs used by the Shopper Contexts resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// Read a resource.
    Get,
    /// Create/replace a resource (idempotent upsert).
    Put,
    /// Partially update a resource.
    Patch,
    /// Delete a resource.
    Delete,
}

impl HttpMethod {
    /// Returns the verb as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A request handed to an [`HttpClient`](super::HttpClient).
///
/// Bodies are raw bytes; serialization opinions live in the typed resource
/// client, not the transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: HttpMethod,

    /// Fully-built request URL including query string.
    pub url: String,

    /// Headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,

    /// Optional request body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }
}

/// A response returned by an [`HttpClient`](super::HttpClient).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,

    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Configuration for the typed Shopper Contexts client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API base URL up to and including the version segment,
    /// e.g. `https://api.example.com/shopper/shopper-context/v1`.
    pub base_url: String,

    /// Organization the resource belongs to.
    pub organization_id: String,

    /// Site identifier sent as the `siteId` query parameter.
    pub site_id: String,

    /// Client identifier sent for API attribution.
    pub client_id: String,

    /// Static bearer token attached to every request, if any.
    pub access_token: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com/shopper/shopper-context/v1".to_string(),
            organization_id: String::new(),
            site_id: String::new(),
            client_id: String::new(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Checks that the fields required to build request URLs are present.
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.base_url.is_empty() {
            return Err(ClientError::Config("base_url must not be empty".into()));
        }
        if self.organization_id.is_empty() {
            return Err(ClientError::Config(
                "organization_id must not be empty".into(),
            ));
        }
        if self.site_id.is_empty() {
            return Err(ClientError::Config("site_id must not be empty".into()));
        }
        Ok(())
    }
}
