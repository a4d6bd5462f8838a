//! Event repository implementation

use std::time::Instant;
use sqlx::PgPool;
use crate::database::repositories::map_unique_violation;
use crate::models::event::{Event, CreateEventRequest};
use crate::utils::errors::EventDeskError;
use crate::utils::logging::log_database_operation;

const EVENT_COLUMNS: &str = "event_id, event_name, description, date, pic_link";

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, EventDeskError> {
        let started = Instant::now();
        let event_id = request.event_id.clone();

        let result = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (event_id, event_name, description, date, pic_link)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.event_id)
        .bind(request.event_name)
        .bind(request.description)
        .bind(request.date)
        .bind(request.pic_link)
        .fetch_one(&self.pool)
        .await;

        log_database_operation("insert", "events", started.elapsed().as_millis() as u64, result.is_ok());
        result.map_err(|e| map_unique_violation(e, |_| event_id.clone()))
    }

    /// Find event by its business identifier
    pub async fn find_by_event_id(&self, event_id: &str) -> Result<Option<Event>, EventDeskError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = $1"
        ))
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find all events whose identifier is in the given list
    pub async fn find_by_event_ids(&self, event_ids: &[String]) -> Result<Vec<Event>, EventDeskError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ANY($1) ORDER BY event_id COLLATE \"C\" ASC"
        ))
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// List all events
    pub async fn list(&self) -> Result<Vec<Event>, EventDeskError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC, event_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }
}
