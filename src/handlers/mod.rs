//! HTTP handlers and router composition

pub mod auth;
pub mod events;
pub mod extract;
pub mod health;
pub mod params;
pub mod users;

use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    BoxError, Json, Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::config::ServerConfig;
use crate::middleware::trace_layer;
use crate::state::AppState;
use crate::utils::errors::ErrorResponse;

pub use extract::{ValidatedJson, ValidatedPath};

/// Build the application router.
///
/// # Routes
///
/// Under the configured API prefix (`/api` by default):
/// - `GET /auth/google`, `GET /auth/google/callback`
/// - `GET /protected`
/// - `GET|POST /events`, `GET /events/:eventId`
/// - `GET|POST /users`, `GET /users/:userId`
/// - `POST /users/:userId/register`
/// - `DELETE /users/:userId/unregister/:eventId`
///
/// `GET /health` sits outside the prefix.
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;

    let api = Router::new()
        .route("/auth/google", get(auth::google_login))
        .route("/auth/google/callback", get(auth::google_callback))
        .route("/protected", get(auth::protected))
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:eventId", get(events::get_event))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:userId", get(users::get_user))
        .route("/users/:userId/register", post(users::register))
        .route("/users/:userId/unregister/:eventId", delete(users::unregister));

    let prefix = server.api_prefix.trim_end_matches('/');
    let router = Router::new().route("/health", get(health::health));
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(prefix, api)
    };

    let timeout = Duration::from_secs(server.request_timeout_secs);
    let cors = cors_layer(server);

    router
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer())
                .layer(cors)
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(timeout),
        )
        .with_state(state)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    if server.cors_allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        warn!("Request timed out");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(ErrorResponse { message: "Request timed out".to_string(), invalid_event_ids: None }),
        );
    }

    warn!(error = %err, "Unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { message: "Internal server error".to_string(), invalid_event_ids: None }),
    )
}
