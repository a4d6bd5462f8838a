//! Event endpoints

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use crate::handlers::extract::{ValidatedJson, ValidatedPath};
use crate::handlers::params::EventPath;
use crate::models::{CreateEventRequest, Event, EventDetails};
use crate::state::AppState;
use crate::utils::errors::Result;

/// `GET /events`
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>> {
    let events = state.services.event_service.list_events().await?;
    Ok(Json(events))
}

/// `POST /events`
pub async fn create_event(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> Result<(StatusCode, Json<Event>)> {
    let event = state.services.event_service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events/:eventId`
pub async fn get_event(
    State(state): State<AppState>,
    ValidatedPath(EventPath { event_id }): ValidatedPath<EventPath>,
) -> Result<Json<EventDetails>> {
    let details = state.services.registration_service.event_details(&event_id).await?;
    Ok(Json(details))
}
