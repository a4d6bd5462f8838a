#![allow(dead_code)]

//! Test helpers
//!
//! Builds the full router over an in-memory store, with Google endpoints
//! pointed at a wiremock server, and drives it with `tower::ServiceExt::oneshot`.

pub mod test_data;
pub mod toggle_store;

pub use test_data::*;
pub use toggle_store::ToggleStore;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;
use EventDesk::{create_router, AppState, EntityStore, InMemoryStore, Settings};

pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789";

/// Response as seen by a client
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Router, state and mock identity provider for one test
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
    pub store: Arc<dyn EntityStore>,
    pub google: MockServer,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::build(Arc::new(InMemoryStore::new()), |_| {}).await
    }

    /// Context whose settings are adjusted before the router is built
    pub async fn with_settings(configure: impl FnOnce(&mut Settings)) -> Self {
        Self::build(Arc::new(InMemoryStore::new()), configure).await
    }

    /// Context over a caller-supplied store
    pub async fn with_store(store: Arc<dyn EntityStore>) -> Self {
        Self::build(store, |_| {}).await
    }

    async fn build(store: Arc<dyn EntityStore>, configure: impl FnOnce(&mut Settings)) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let google = MockServer::start().await;
        let mut settings = test_settings(&google);
        configure(&mut settings);

        let state = AppState::new(settings, store.clone()).expect("failed to build app state");
        let app = create_router(state.clone());

        Self { app, state, store, google }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>, token: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Create an event through the API, asserting success
    pub async fn seed_event(&self, event_id: &str, date: &str) {
        let response = self.post("/api/events", event_payload(event_id, date)).await;
        assert_eq!(response.status, StatusCode::CREATED, "seeding event {}: {:?}", event_id, response.body);
    }

    /// Create a user through the API, asserting success
    pub async fn seed_user(&self, user_id: &str, email: &str) {
        let response = self.post("/api/users", user_payload(user_id, email)).await;
        assert_eq!(response.status, StatusCode::CREATED, "seeding user {}: {:?}", user_id, response.body);
    }
}

/// Settings for tests, with Google endpoints on the mock server
pub fn test_settings(google: &MockServer) -> Settings {
    let mut settings = Settings::default();

    settings.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    settings.auth.token_ttl_seconds = 300;

    settings.google.client_id = "test-client-id".to_string();
    settings.google.client_secret = "test-client-secret".to_string();
    settings.google.auth_url = format!("{}/o/oauth2/v2/auth", google.uri());
    settings.google.token_url = format!("{}/token", google.uri());
    settings.google.userinfo_url = format!("{}/userinfo", google.uri());

    settings.logging.level = "debug".to_string();

    settings
}
