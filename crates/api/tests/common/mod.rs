//! Shared harness for API integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack (CORS, request ID, timeout, tracing, panic recovery)
//! that production uses, with the workflow engine replaced by an
//! always-accepting stub.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use custodia_api::config::ServerConfig;
use custodia_api::router::build_app_router;
use custodia_api::state::AppState;
use custodia_janitor::settings::{JanitorSettings, WorkflowIds};
use custodia_workflow::{
    StartRunRequest, StartedRun, WorkflowApiConfig, WorkflowDispatch, WorkflowError,
};

/// Bearer token the test config accepts.
pub const TEST_CRON_SECRET: &str = "test-cron-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        cron_secret: TEST_CRON_SECRET.to_string(),
        engine: WorkflowApiConfig {
            base_url: "http://localhost:5002".to_string(),
            token: "test-engine-token".to_string(),
        },
    }
}

/// Janitor settings with the scheduler flag set as requested.
pub fn test_settings(scheduled_enabled: bool) -> JanitorSettings {
    JanitorSettings {
        scheduled_enabled,
        interval_secs: 600,
        webhook_base_url: "http://localhost:3000".to_string(),
        workflow_ids: WorkflowIds {
            unit_tests: 10,
            integration_tests: 11,
            e2e_tests: 12,
            security_review: 13,
        },
    }
}

/// A [`WorkflowDispatch`] stub that accepts every start request and counts
/// the calls it receives.
pub struct StubEngine {
    calls: AtomicUsize,
}

impl StubEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkflowDispatch for StubEngine {
    async fn start_run(&self, request: &StartRunRequest) -> Result<StartedRun, WorkflowError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(StartedRun {
            external_id: format!("run-{}", request.workspace_id),
        })
    }
}

/// Build the full application router with the scheduler flag enabled and an
/// always-accepting engine stub.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_settings(true), StubEngine::new())
}

/// Build the application router with custom settings and engine.
pub fn build_test_app_with(
    pool: PgPool,
    settings: JanitorSettings,
    engine: Arc<dyn WorkflowDispatch>,
) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        janitor: Arc::new(settings),
        engine,
    };
    build_app_router(state, &config)
}

/// Issue a GET request with no auth header.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST with a JSON body and the test bearer credential.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("authorization", format!("Bearer {TEST_CRON_SECRET}"))
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a GET with the test bearer credential.
pub async fn get_authed(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {TEST_CRON_SECRET}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response is a 401 with the standard error envelope.
pub async fn assert_unauthorized(response: Response) {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}
