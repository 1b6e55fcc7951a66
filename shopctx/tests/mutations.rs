//! End-to-end tests for the mutation adapter over a recording transport.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use shopctx::app::{AppConfig, ShopCtxApp};
use shopctx::cache::matrix;
use shopctx::client::{
    ClientConfig, ClientError, HttpClient, HttpMethod, HttpRequest, HttpResponse,
};
use shopctx::context::{
    ContextKey, CreateContextOptions, DeleteContextOptions, ShopperContext, UpdateContextOptions,
};
use shopctx::mutation::{MutationError, MutationOperation, MutationPayload, MutationStatus};

/// Records every request and answers from a FIFO queue of canned responses.
struct RecordingClient {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<Vec<HttpResponse>>,
}

impl RecordingClient {
    fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(Vec::new()),
        }
    }

    fn push_response(&self, status: u16, body: &[u8]) {
        self.responses.lock().unwrap().push(HttpResponse {
            status,
            body: body.to_vec(),
        });
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for RecordingClient {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, ClientError>> + Send + '_>> {
        self.requests.lock().unwrap().push(request);
        let response = {
            let mut queue = self.responses.lock().unwrap();
            if queue.is_empty() {
                HttpResponse {
                    status: 200,
                    body: b"{}".to_vec(),
                }
            } else {
                queue.remove(0)
            }
        };
        Box::pin(async move { Ok(response) })
    }
}

fn app_config() -> AppConfig {
    AppConfig {
        client: ClientConfig {
            base_url: "https://api.example.com/shopper/shopper-context/v1".to_string(),
            organization_id: "f_ecom_org".to_string(),
            site_id: "RefArch".to_string(),
            access_token: Some("tok-123".to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn start_app() -> (Arc<RecordingClient>, ShopCtxApp) {
    let transport = Arc::new(RecordingClient::new());
    let app = ShopCtxApp::with_http_client(app_config(), transport.clone()).unwrap();
    (transport, app)
}

fn key() -> ContextKey {
    ContextKey::new("54ad2c5a-91f0", "RefArch")
}

#[tokio::test]
async fn create_mutation_invokes_create_method_with_options() {
    let (transport, app) = start_app();
    transport.push_response(200, b"{\"sourceCode\":\"instagram\"}");

    let api = app.shopper_contexts().unwrap();
    let handle = api.mutation("createShopperContext").unwrap();

    let payload = MutationPayload::Create(CreateContextOptions {
        key: key(),
        context: ShopperContext {
            source_code: Some("instagram".to_string()),
            ..Default::default()
        },
    });
    let result = handle.trigger(payload).await.unwrap().unwrap();
    assert_eq!(result.source_code.as_deref(), Some("instagram"));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert!(requests[0]
        .url
        .contains("/organizations/f_ecom_org/shopper-context/54ad2c5a-91f0"));
    let body = std::str::from_utf8(requests[0].body.as_deref().unwrap()).unwrap();
    assert!(body.contains("instagram"));
}

#[tokio::test]
async fn update_mutation_invokes_patch_method() {
    let (transport, app) = start_app();
    let api = app.shopper_contexts().unwrap();
    let handle = api.mutation("updateShopperContext").unwrap();

    let payload = MutationPayload::Update(UpdateContextOptions {
        key: key(),
        context: ShopperContext::default(),
    });
    handle.trigger(payload).await.unwrap();

    assert_eq!(transport.requests()[0].method, HttpMethod::Patch);
}

#[tokio::test]
async fn delete_mutation_invokes_delete_method() {
    let (transport, app) = start_app();
    transport.push_response(204, b"");

    let api = app.shopper_contexts().unwrap();
    let handle = api.mutation("deleteShopperContext").unwrap();

    let payload = MutationPayload::Delete(DeleteContextOptions { key: key() });
    let result = handle.trigger(payload).await.unwrap();
    assert!(result.is_none());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn bogus_operation_fails_synchronously_without_network() {
    let (transport, app) = start_app();
    let api = app.shopper_contexts().unwrap();

    let err = api.mutation("bogusOperation").unwrap_err();
    match err {
        MutationError::NotImplemented { operation } => assert_eq!(operation, "bogusOperation"),
        other => panic!("expected NotImplemented, got {:?}", other),
    }
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn handle_carries_the_registered_cache_update_getter() {
    let (_, app) = start_app();
    let api = app.shopper_contexts().unwrap();

    for op in MutationOperation::ALL {
        let handle = api.mutation(op.as_str()).unwrap();
        let registered = matrix::cache_update_getter(op).unwrap();

        // Behavioral identity: same payload and data produce the same update.
        let payload = MutationPayload::Delete(DeleteContextOptions { key: key() });
        assert_eq!(
            (handle.cache_update_getter())(&payload, None),
            registered(&payload, None),
            "getter mismatch for {}",
            op
        );
    }
}

#[tokio::test]
async fn successful_create_populates_cache_for_reads() {
    let (transport, app) = start_app();
    transport.push_response(200, b"{\"sourceCode\":\"email\"}");

    let api = app.shopper_contexts().unwrap();
    let handle = api.mutation("createShopperContext").unwrap();
    let payload = MutationPayload::Create(CreateContextOptions {
        key: key(),
        context: ShopperContext::default(),
    });
    handle.trigger(payload).await.unwrap();

    // The cached server copy satisfies the read without another request.
    let cached = app.context_cache().get(&key()).await.unwrap();
    assert_eq!(cached.source_code.as_deref(), Some("email"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn delete_invalidates_cached_entry() {
    let (transport, app) = start_app();
    let api = app.shopper_contexts().unwrap();

    app.context_cache()
        .put(&key(), &ShopperContext::default())
        .await;
    assert!(app.context_cache().get(&key()).await.is_some());

    transport.push_response(204, b"");
    let handle = api.mutation("deleteShopperContext").unwrap();
    handle
        .trigger(MutationPayload::Delete(DeleteContextOptions { key: key() }))
        .await
        .unwrap();

    assert!(app.context_cache().get(&key()).await.is_none());
}

#[tokio::test]
async fn failed_mutation_reports_error_state_and_passes_client_error_through() {
    let (transport, app) = start_app();
    transport.push_response(401, b"{\"detail\":\"expired token\"}");

    let api = app.shopper_contexts().unwrap();
    let handle = api.mutation("createShopperContext").unwrap();
    let payload = MutationPayload::Create(CreateContextOptions {
        key: key(),
        context: ShopperContext::default(),
    });

    let err = handle.trigger(payload).await.unwrap_err();
    match err {
        MutationError::Client(ClientError::Status { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected pass-through Status error, got {:?}", other),
    }
    assert_eq!(handle.status(), MutationStatus::Error);
    assert!(handle.error().is_some());
    assert!(handle.data().is_none());
}

#[tokio::test]
async fn mutation_metrics_are_recorded() {
    let (transport, app) = start_app();
    transport.push_response(200, b"{}");
    transport.push_response(500, b"oops");

    let api = app.shopper_contexts().unwrap();
    let handle = api.mutation("createShopperContext").unwrap();
    let payload = MutationPayload::Create(CreateContextOptions {
        key: key(),
        context: ShopperContext::default(),
    });

    handle.trigger(payload.clone()).await.unwrap();
    handle.trigger(payload).await.unwrap_err();

    let snapshot = app.metrics_snapshot();
    assert_eq!(snapshot.mutations_started, 2);
    assert_eq!(snapshot.mutations_succeeded, 1);
    assert_eq!(snapshot.mutations_failed, 1);
    assert_eq!(snapshot.cache_ops_applied, 1);
}
