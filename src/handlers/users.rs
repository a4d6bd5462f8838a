//! User and registration endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use crate::handlers::extract::{ValidatedJson, ValidatedPath};
use crate::handlers::params::{UserEventPath, UserPath};
use crate::models::{CreateUserRequest, RegisterEventsRequest, User, UserWithEvents};
use crate::state::AppState;
use crate::utils::errors::Result;

#[derive(Debug, Serialize)]
pub struct UserUpdateResponse {
    pub message: String,
    pub user: User,
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserWithEvents>>> {
    let users = state.services.registration_service.list_users_with_events().await?;
    Ok(Json(users))
}

/// `GET /users/:userId`, answering `null` for an unknown user
pub async fn get_user(
    State(state): State<AppState>,
    ValidatedPath(UserPath { user_id }): ValidatedPath<UserPath>,
) -> Result<Json<Option<User>>> {
    let user = state.services.user_service.get_user(&user_id).await?;
    Ok(Json(user))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.services.user_service.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /users/:userId/register`
pub async fn register(
    State(state): State<AppState>,
    ValidatedPath(UserPath { user_id }): ValidatedPath<UserPath>,
    ValidatedJson(request): ValidatedJson<RegisterEventsRequest>,
) -> Result<Json<UserUpdateResponse>> {
    let user = state
        .services
        .registration_service
        .register(&user_id, &request.event_ids)
        .await?;

    Ok(Json(UserUpdateResponse {
        message: "User registered for events".to_string(),
        user,
    }))
}

/// `DELETE /users/:userId/unregister/:eventId`
pub async fn unregister(
    State(state): State<AppState>,
    ValidatedPath(UserEventPath { user_id, event_id }): ValidatedPath<UserEventPath>,
) -> Result<Json<UserUpdateResponse>> {
    let user = state
        .services
        .registration_service
        .unregister(&user_id, &event_id)
        .await?;

    Ok(Json(UserUpdateResponse {
        message: "User unregistered from event".to_string(),
        user,
    }))
}
