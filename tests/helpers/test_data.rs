//! Request payloads and mock provider responses

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

pub fn event_payload(event_id: &str, date: &str) -> Value {
    json!({
        "event_id": event_id,
        "event_name": format!("Event {}", event_id),
        "description": "Social dance night",
        "date": date,
        "pic_link": "https://example.com/pic.png"
    })
}

pub fn user_payload(user_id: &str, email: &str) -> Value {
    json!({
        "user_id": user_id,
        "name": format!("User {}", user_id),
        "email": email
    })
}

/// Mount a successful token exchange and userinfo response
pub async fn mock_google_sign_in(server: &MockServer, subject: &str, email: &str, name: &str) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "mock-google-access-token",
            "token_type": "Bearer",
            "expires_in": 3599
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/userinfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sub": subject,
            "email": email,
            "email_verified": true,
            "name": name
        })))
        .mount(server)
        .await;
}
