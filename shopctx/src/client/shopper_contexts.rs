//! Typed client for the Shopper Contexts resource.
//!
//! One async method per backend operation identifier:
//!
//! | Method                    | Verb   | Endpoint                                             |
//! |---------------------------|--------|------------------------------------------------------|
//! | `create_shopper_context`  | PUT    | `/organizations/{org}/shopper-context/{usid}`        |
//! | `get_shopper_context`     | GET    | `/organizations/{org}/shopper-context/{usid}`        |
//! | `update_shopper_context`  | PATCH  | `/organizations/{org}/shopper-context/{usid}`        |
//! | `delete_shopper_context`  | DELETE | `/organizations/{org}/shopper-context/{usid}`        |
//!
//! The client owns URL building, auth headers, and JSON (de)serialization.
//! Transport is injected via the [`HttpClient`] trait.

use std::sync::Arc;

use tracing::debug;

use crate::context::{
    ContextKey, CreateContextOptions, DeleteContextOptions, GetContextOptions, ShopperContext,
    UpdateContextOptions,
};

use super::http::HttpClient;
use super::types::{ClientConfig, ClientError, HttpMethod, HttpRequest, HttpResponse};

/// Maximum number of response-body bytes echoed into a `Status` error.
const ERROR_BODY_LIMIT: usize = 256;

/// Typed client for the Shopper Contexts resource family.
///
/// Cheap to clone; the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct ShopperContextsClient {
    http: Arc<dyn HttpClient>,
    config: ClientConfig,
}

impl ShopperContextsClient {
    /// Creates a new client over the given transport.
    ///
    /// # Arguments
    ///
    /// * `http` - The HTTP transport
    /// * `config` - Validated endpoint configuration
    pub fn new(http: Arc<dyn HttpClient>, config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(Self { http, config })
    }

    /// Returns the endpoint configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates (or replaces) the shopper context for a usid.
    pub async fn create_shopper_context(
        &self,
        options: &CreateContextOptions,
    ) -> Result<ShopperContext, ClientError> {
        let url = self.context_url(&options.key)?;
        let body = serde_json::to_vec(&options.context)?;
        debug!(usid = %options.key.usid, "Creating shopper context");

        let response = self
            .execute(HttpRequest::new(HttpMethod::Put, url).with_body(body))
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Reads the shopper context for a usid.
    pub async fn get_shopper_context(
        &self,
        options: &GetContextOptions,
    ) -> Result<ShopperContext, ClientError> {
        let url = self.context_url(&options.key)?;
        debug!(usid = %options.key.usid, "Fetching shopper context");

        let response = self.execute(HttpRequest::new(HttpMethod::Get, url)).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Partially updates the shopper context for a usid.
    pub async fn update_shopper_context(
        &self,
        options: &UpdateContextOptions,
    ) -> Result<ShopperContext, ClientError> {
        let url = self.context_url(&options.key)?;
        let body = serde_json::to_vec(&options.context)?;
        debug!(usid = %options.key.usid, "Updating shopper context");

        let response = self
            .execute(HttpRequest::new(HttpMethod::Patch, url).with_body(body))
            .await?;
        Ok(serde_json::from_slice(&response.body)?)
    }

    /// Deletes the shopper context for a usid.
    pub async fn delete_shopper_context(
        &self,
        options: &DeleteContextOptions,
    ) -> Result<(), ClientError> {
        let url = self.context_url(&options.key)?;
        debug!(usid = %options.key.usid, "Deleting shopper context");

        self.execute(HttpRequest::new(HttpMethod::Delete, url))
            .await?;
        Ok(())
    }

    /// Builds the resource URL for a context key.
    fn context_url(&self, key: &ContextKey) -> Result<String, ClientError> {
        if key.usid.is_empty() {
            return Err(ClientError::Config("usid must not be empty".into()));
        }
        let site_id = if key.site_id.is_empty() {
            &self.config.site_id
        } else {
            &key.site_id
        };

        Ok(format!(
            "{}/organizations/{}/shopper-context/{}?siteId={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.organization_id,
            key.usid,
            site_id,
        ))
    }

    /// Attaches standard headers, sends, and enforces a success status.
    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, ClientError> {
        request = request.with_header("Content-Type", "application/json");
        if !self.config.client_id.is_empty() {
            request = request.with_header("x-client-id", self.config.client_id.clone());
        }
        if let Some(token) = &self.config.access_token {
            request = request.with_header("Authorization", format!("Bearer {}", token));
        }

        let url = request.url.clone();
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            let mut body = String::from_utf8_lossy(&response.body).into_owned();
            body.truncate(ERROR_BODY_LIMIT);
            return Err(ClientError::Status {
                status: response.status,
                url,
                body,
            });
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::super::http::tests::MockHttpClient;
    use super::*;

    fn test_config() -> ClientConfig {
        ClientConfig {
            base_url: "https://api.example.com/shopper/shopper-context/v1".to_string(),
            organization_id: "f_ecom_org".to_string(),
            site_id: "RefArch".to_string(),
            client_id: "client-abc".to_string(),
            access_token: Some("tok-123".to_string()),
            ..Default::default()
        }
    }

    fn client_with_mock() -> (Arc<MockHttpClient>, ShopperContextsClient) {
        let mock = Arc::new(MockHttpClient::new());
        let client =
            ShopperContextsClient::new(mock.clone() as Arc<dyn HttpClient>, test_config()).unwrap();
        (mock, client)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mock = Arc::new(MockHttpClient::new());
        let result = ShopperContextsClient::new(mock, ClientConfig::default());
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[tokio::test]
    async fn test_create_puts_serialized_body() {
        let (mock, client) = client_with_mock();
        mock.push_response(200, b"{\"sourceCode\":\"instagram\"}");

        let options = CreateContextOptions {
            key: ContextKey::new("usid-1", "RefArch"),
            context: ShopperContext {
                source_code: Some("instagram".to_string()),
                ..Default::default()
            },
        };
        let created = client.create_shopper_context(&options).await.unwrap();
        assert_eq!(created.source_code.as_deref(), Some("instagram"));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Put);
        assert_eq!(
            requests[0].url,
            "https://api.example.com/shopper/shopper-context/v1/organizations/f_ecom_org/shopper-context/usid-1?siteId=RefArch"
        );
        let body = requests[0].body.as_deref().unwrap();
        assert!(std::str::from_utf8(body).unwrap().contains("instagram"));
    }

    #[tokio::test]
    async fn test_delete_uses_delete_verb_and_no_body() {
        let (mock, client) = client_with_mock();
        mock.push_response(204, b"");

        let options = DeleteContextOptions {
            key: ContextKey::new("usid-1", "RefArch"),
        };
        client.delete_shopper_context(&options).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn test_auth_and_client_headers_attached() {
        let (mock, client) = client_with_mock();
        mock.push_response(200, b"{}");

        let options = GetContextOptions {
            key: ContextKey::new("usid-1", "RefArch"),
        };
        client.get_shopper_context(&options).await.unwrap();

        let headers = mock.requests()[0].headers.clone();
        assert!(headers.contains(&("Authorization".to_string(), "Bearer tok-123".to_string())));
        assert!(headers.contains(&("x-client-id".to_string(), "client-abc".to_string())));
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_body() {
        let (mock, client) = client_with_mock();
        mock.push_response(404, b"{\"detail\":\"no such context\"}");

        let options = GetContextOptions {
            key: ContextKey::new("usid-1", "RefArch"),
        };
        let err = client.get_shopper_context(&options).await.unwrap_err();
        match err {
            ClientError::Status { status, body, .. } => {
                assert_eq!(status, 404);
                assert!(body.contains("no such context"));
            }
            other => panic!("expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_usid_rejected_before_network() {
        let (mock, client) = client_with_mock();

        let options = GetContextOptions {
            key: ContextKey::new("", "RefArch"),
        };
        let result = client.get_shopper_context(&options).await;
        assert!(matches!(result, Err(ClientError::Config(_))));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_key_site_overrides_config_site() {
        let (mock, client) = client_with_mock();
        mock.push_response(200, b"{}");

        let options = GetContextOptions {
            key: ContextKey::new("usid-1", "SiteGenesis"),
        };
        client.get_shopper_context(&options).await.unwrap();
        assert!(mock.requests()[0].url.ends_with("siteId=SiteGenesis"));
    }
}
