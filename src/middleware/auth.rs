//! Authentication middleware
//! 
//! Routes that take an `AuthenticatedUser` argument only run once the bearer
//! token in the `Authorization` header has been verified and its user loaded.
//! Any failure short-circuits with 401 before the handler body executes.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use crate::models::User;
use crate::state::AppState;
use crate::utils::errors::EventDeskError;

/// The user behind a verified bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = EventDeskError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| {
                value
                    .to_str()
                    .map_err(|_| EventDeskError::Unauthenticated("Malformed authorization header".to_string()))
            })
            .transpose()?;

        let user = state
            .services
            .auth_service
            .authenticate_bearer(authorization)
            .await?;

        Ok(Self(user))
    }
}
