//! Google sign-in and protected endpoints

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use serde::{Deserialize, Serialize};
use crate::middleware::AuthenticatedUser;
use crate::models::User;
use crate::state::AppState;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::logging::log_auth_event;

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: User,
}

/// `GET /auth/google`: send the browser to Google's consent screen
pub async fn google_login(State(state): State<AppState>) -> Result<Redirect> {
    let oauth_state = state.services.auth_service.issue_oauth_state()?;
    let url = state.services.google_service.authorization_url(&oauth_state)?;
    Ok(Redirect::to(&url))
}

/// `GET /auth/google/callback`: finish sign-in and hand out a bearer token
pub async fn google_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<TokenResponse>> {
    if let Some(error) = params.error {
        log_auth_event(None, "google_callback", false, Some(&error));
        return Err(EventDeskError::Unauthenticated(format!("Google sign-in failed: {}", error)));
    }

    let oauth_state = params
        .state
        .ok_or_else(|| EventDeskError::Unauthenticated("Missing OAuth state".to_string()))?;
    state.services.auth_service.verify_oauth_state(&oauth_state)?;

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| EventDeskError::Validation("Missing authorization code".to_string()))?;

    let profile = state.services.google_service.authenticate(&code).await?;
    let user = state.services.user_service.resolve_or_create_user(&profile).await?;
    let token = state.services.auth_service.issue_token(&user)?;

    log_auth_event(Some(&user.user_id), "google_callback", true, None);
    Ok(Json(TokenResponse { token }))
}

/// `GET /protected`
pub async fn protected(AuthenticatedUser(user): AuthenticatedUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "You have accessed a protected route".to_string(),
        user,
    })
}
