//! Event service implementation

use std::sync::Arc;
use crate::database::EntityStore;
use crate::models::event::{Event, CreateEventRequest};
use crate::utils::errors::Result;
use crate::utils::logging::log_entity_created;

/// Event creation and listing
#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn EntityStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let event = self.store.create_event(request).await?;
        log_entity_created("event", &event.event_id);
        Ok(event)
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.store.list_events().await
    }
}
