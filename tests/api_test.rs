//! End-to-end tests for the HTTP API over the in-memory store

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};
use helpers::*;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"status": "healthy", "database": "up"}));
}

#[tokio::test]
async fn test_health_reports_unreachable_store() {
    let store = Arc::new(ToggleStore::new());
    let ctx = TestContext::with_store(store.clone()).await;

    store.set_reachable(false);
    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body, json!({"status": "unhealthy", "database": "down"}));

    store.set_reachable(true);
    let response = ctx.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let ctx = TestContext::with_settings(|settings| settings.server.request_timeout_secs = 1).await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "late", "token_type": "Bearer"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&ctx.google)
        .await;

    let state = ctx.state.services.auth_service.issue_oauth_state().unwrap();
    let response = ctx.get(&format!("/api/auth/google/callback?code=slow&state={}", state)).await;
    assert_eq!(response.status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(response.body["message"], "Request timed out");
}

#[tokio::test]
async fn test_undecodable_path_is_json_bad_request() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_user("U1", "u1@example.com").await;

    for uri in [
        "/api/users/%FF",
        "/api/events/%FF",
        "/api/users/U1/unregister/%FF",
        "/api/users/%00",
        "/api/events/%20E1",
    ] {
        let response = match uri {
            u if u.contains("unregister") => ctx.delete(u).await,
            u => ctx.get(u).await,
        };
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert!(response.body["message"].is_string(), "{}: {:?}", uri, response.body);
    }

    let response = ctx.post("/api/users/%FF/register", json!({"event_ids": ["E1"]})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_padded_and_control_character_input_rejected() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_user("U1", "u1@example.com").await;

    let response = ctx.post("/api/events", event_payload(" E2 ", "2025-03-02")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/events", event_payload("E\u{0}3", "2025-03-03")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/users", json!({
        "user_id": "U2",
        "name": "Nul\u{0}Name",
        "email": "u2@example.com"
    })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].is_string());

    let response = ctx.post("/api/users/U1/register", json!({"event_ids": [" E1 "]})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.get("/api/users/U1").await;
    assert_eq!(response.body["registered_events"], json!([]));
    let response = ctx.get("/api/events").await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_and_list_events() {
    let ctx = TestContext::new().await;

    let response = ctx.post("/api/events", event_payload("E2", "2025-03-02T19:00:00Z")).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["event_id"], "E2");
    assert_eq!(response.body["date"], "2025-03-02T19:00:00Z");

    // date-only input is stored as midnight UTC
    let response = ctx.post("/api/events", event_payload("E1", "2025-03-01")).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["date"], "2025-03-01T00:00:00Z");

    let response = ctx.get("/api/events").await;
    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["event_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["E1", "E2"]);
}

#[tokio::test]
async fn test_create_event_rejects_bad_input() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;

    let response = ctx.post("/api/events", event_payload("E1", "2025-04-01")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].as_str().unwrap().contains("event_id"));

    let response = ctx.post("/api/events", event_payload("E2", "next tuesday")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/events", json!({"event_id": "E3"})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/events", json!({
        "event_id": "E4",
        "event_name": "Bad picture",
        "date": "2025-03-01",
        "pic_link": "ftp://example.com/pic.png"
    })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new().await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"user_id\": "))
        .unwrap();
    let response = ctx.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_get_event_unknown_is_not_found() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/api/events/E404").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Event not found: E404");
}

#[tokio::test]
async fn test_create_user_and_duplicates() {
    let ctx = TestContext::new().await;

    let response = ctx.post("/api/users", user_payload("U1", "u1@example.com")).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user_id"], "U1");
    assert_eq!(response.body["registered_events"], json!([]));

    let response = ctx.post("/api/users", user_payload("U2", "u1@example.com")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/users", user_payload("U1", "other@example.com")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.post("/api/users", user_payload("U3", "not-an-email")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_user_is_null() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/api/users/U404").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.is_null());
}

#[tokio::test]
async fn test_register_and_view_event() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_user("U1", "u1@example.com").await;

    let response = ctx.post("/api/users/U1/register", json!({"event_ids": ["E1"]})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User registered for events");
    assert_eq!(response.body["user"]["registered_events"], json!(["E1"]));

    let response = ctx.get("/api/events/E1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["event"]["event_id"], "E1");
    assert_eq!(
        response.body["registered_users"],
        json!([{"name": "User U1", "email": "u1@example.com"}])
    );

    let response = ctx.get("/api/users/U1").await;
    assert_eq!(response.body["registered_events"], json!(["E1"]));
}

#[tokio::test]
async fn test_register_is_idempotent_and_deduplicated() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_event("E2", "2025-03-02").await;
    ctx.seed_user("U1", "u1@example.com").await;

    let response = ctx.post("/api/users/U1/register", json!({"event_ids": ["E2", "E1", "E2"]})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["registered_events"], json!(["E1", "E2"]));

    let response = ctx.post("/api/users/U1/register", json!({"event_ids": ["E1"]})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["registered_events"], json!(["E1", "E2"]));

    // an empty request changes nothing
    let response = ctx.post("/api/users/U1/register", json!({"event_ids": []})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["registered_events"], json!(["E1", "E2"]));
}

#[tokio::test]
async fn test_register_with_unknown_event_changes_nothing() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_user("U1", "u1@example.com").await;

    let response = ctx
        .post("/api/users/U1/register", json!({"event_ids": ["E1", "E999", "E998"]}))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Some events do not exist");
    assert_eq!(response.body["invalidEventIds"], json!(["E998", "E999"]));

    let response = ctx.get("/api/users/U1").await;
    assert_eq!(response.body["registered_events"], json!([]));
}

#[tokio::test]
async fn test_register_unknown_user_is_not_found() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;

    let response = ctx.post("/api/users/U404/register", json!({"event_ids": ["E1"]})).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "User not found: U404");
}

#[tokio::test]
async fn test_register_accepts_camel_case_ids() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_user("U1", "u1@example.com").await;

    let response = ctx.post("/api/users/U1/register", json!({"eventIds": ["E1"]})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["registered_events"], json!(["E1"]));
}

#[tokio::test]
async fn test_unregister() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_event("E2", "2025-03-02").await;
    ctx.seed_user("U1", "u1@example.com").await;
    ctx.post("/api/users/U1/register", json!({"event_ids": ["E1", "E2"]})).await;

    let response = ctx.delete("/api/users/U1/unregister/E1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User unregistered from event");
    assert_eq!(response.body["user"]["registered_events"], json!(["E2"]));

    // existing event the user is not registered for
    let response = ctx.delete("/api/users/U1/unregister/E1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["registered_events"], json!(["E2"]));

    let response = ctx.delete("/api/users/U1/unregister/E404").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Event not found: E404");

    let response = ctx.delete("/api/users/U404/unregister/E2").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx.get("/api/events/E1").await;
    assert_eq!(response.body["registered_users"], json!([]));
}

#[tokio::test]
async fn test_list_users_resolves_events() {
    let ctx = TestContext::new().await;
    ctx.seed_event("E1", "2025-03-01").await;
    ctx.seed_event("E2", "2025-03-02").await;
    ctx.seed_user("U1", "u1@example.com").await;
    ctx.seed_user("U2", "u2@example.com").await;
    ctx.post("/api/users/U1/register", json!({"event_ids": ["E2", "E1"]})).await;

    let response = ctx.get("/api/users").await;
    assert_eq!(response.status, StatusCode::OK);

    let users = response.body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["user_id"], "U1");
    assert_eq!(users[0]["registered_events"][0]["event_id"], "E1");
    assert_eq!(users[0]["registered_events"][1]["event_name"], "Event E2");
    assert_eq!(users[1]["user_id"], "U2");
    assert_eq!(users[1]["registered_events"], json!([]));
}

#[tokio::test]
async fn test_protected_requires_bearer_token() {
    let ctx = TestContext::new().await;
    ctx.seed_user("U1", "u1@example.com").await;

    let response = ctx.get("/api/protected").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["message"].is_string());

    let response = ctx.request(Method::GET, "/api/protected", None, Some("not-a-jwt")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let user = ctx.state.services.user_service.get_user("U1").await.unwrap().unwrap();
    let token = ctx.state.services.auth_service.issue_token(&user).unwrap();

    let response = ctx.request(Method::GET, "/api/protected", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["user_id"], "U1");
    assert_eq!(response.body["user"]["email"], "u1@example.com");
}

#[tokio::test]
async fn test_google_login_redirects_with_state() {
    let ctx = TestContext::new().await;

    let response = ctx.get("/api/auth/google").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let location = response.headers[header::LOCATION].to_str().unwrap();
    let url = url::Url::parse(location).unwrap();
    assert!(location.starts_with(&format!("{}/o/oauth2/v2/auth", ctx.google.uri())));

    let state = url
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .unwrap();
    assert!(ctx.state.services.auth_service.verify_oauth_state(&state).is_ok());
}

#[tokio::test]
async fn test_google_callback_issues_usable_token() {
    let ctx = TestContext::new().await;
    mock_google_sign_in(&ctx.google, "1101", "dancer@example.com", "Lindy Hopper").await;

    let state = ctx.state.services.auth_service.issue_oauth_state().unwrap();
    let uri = format!("/api/auth/google/callback?code=auth-code&state={}", state);

    let response = ctx.get(&uri).await;
    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["token"].as_str().unwrap().to_string();

    let response = ctx.request(Method::GET, "/api/protected", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["user_id"], "google-1101");
    assert_eq!(response.body["user"]["name"], "Lindy Hopper");

    // signing in again reuses the same user
    let response = ctx.get(&uri).await;
    assert_eq!(response.status, StatusCode::OK);
    let response = ctx.get("/api/users").await;
    assert_eq!(response.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_google_callback_links_existing_email() {
    let ctx = TestContext::new().await;
    ctx.seed_user("U1", "dancer@example.com").await;
    mock_google_sign_in(&ctx.google, "1101", "dancer@example.com", "Lindy Hopper").await;

    let state = ctx.state.services.auth_service.issue_oauth_state().unwrap();
    let response = ctx.get(&format!("/api/auth/google/callback?code=auth-code&state={}", state)).await;
    assert_eq!(response.status, StatusCode::OK);

    let token = response.body["token"].as_str().unwrap().to_string();
    let response = ctx.request(Method::GET, "/api/protected", None, Some(&token)).await;
    assert_eq!(response.body["user"]["user_id"], "U1");
}

#[tokio::test]
async fn test_google_callback_rejects_bad_state() {
    let ctx = TestContext::new().await;
    mock_google_sign_in(&ctx.google, "1101", "dancer@example.com", "Lindy Hopper").await;

    let response = ctx.get("/api/auth/google/callback?code=auth-code&state=forged").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = ctx.get("/api/auth/google/callback?code=auth-code").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = ctx.get("/api/auth/google/callback?error=access_denied").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_google_callback_without_code_is_bad_request() {
    let ctx = TestContext::new().await;

    let state = ctx.state.services.auth_service.issue_oauth_state().unwrap();
    let response = ctx.get(&format!("/api/auth/google/callback?state={}", state)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_google_provider_failure_is_bad_gateway() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&ctx.google)
        .await;

    let state = ctx.state.services.auth_service.issue_oauth_state().unwrap();
    let response = ctx.get(&format!("/api/auth/google/callback?code=stale&state={}", state)).await;
    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["message"], "Identity provider request failed");
}
