//! Request extraction with validation
//!
//! Rejections from axum's own extractors are turned into `Validation` errors
//! so every 400 carries the `{"message"}` body.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use crate::models::Validate;
use crate::utils::errors::EventDeskError;

/// JSON body that has been deserialized and passed its `Validate` checks.
///
/// Malformed JSON, wrong field types and failed checks are all rejected as
/// `Validation` errors (400) before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = EventDeskError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| EventDeskError::Validation(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters, decoded and checked the same way as `ValidatedJson`
#[derive(Debug, Clone)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = EventDeskError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| EventDeskError::Validation(rejection.body_text()))?;

        value.validate()?;
        Ok(Self(value))
    }
}
