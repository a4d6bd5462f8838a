//! Registration service
//!
//! Keeps each user's set of registered events consistent: every added
//! `event_id` must exist, the set never holds duplicates, and a register call
//! either applies all requested ids or none of them.

use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;
use crate::database::EntityStore;
use crate::models::{Event, EventDetails, RegisteredUser, User, UserWithEvents};
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::dedup_ids;
use crate::utils::logging::log_registration_change;

#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn EntityStore>,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Register the user for every requested event.
    ///
    /// Fails with `NotFound` for an unknown user and with `InvalidReference`
    /// (listing the unknown ids, sorted) if any requested event does not
    /// exist; nothing is written in either case.
    pub async fn register(&self, user_id: &str, event_ids: &[String]) -> Result<User> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| EventDeskError::user_not_found(user_id))?;

        let requested: Vec<String> = dedup_ids(event_ids.iter().cloned()).into_iter().collect();
        if requested.is_empty() {
            return Ok(user);
        }

        let found: BTreeSet<String> = self
            .store
            .find_events(&requested)
            .await?
            .into_iter()
            .map(|event| event.event_id)
            .collect();

        let invalid: Vec<String> = requested
            .iter()
            .filter(|id| !found.contains(*id))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            debug!(user_id = user_id, invalid = ?invalid, "Registration rejected");
            return Err(EventDeskError::InvalidReference(invalid));
        }

        let updated = self
            .store
            .add_registrations(user_id, &requested)
            .await?
            .ok_or_else(|| EventDeskError::user_not_found(user_id))?;

        log_registration_change(user_id, "register", &requested, updated.registered_events.len());
        Ok(updated)
    }

    /// Remove the event from the user's registrations.
    ///
    /// The event must exist; removing one the user never registered for is a no-op.
    pub async fn unregister(&self, user_id: &str, event_id: &str) -> Result<User> {
        if self.store.find_user(user_id).await?.is_none() {
            return Err(EventDeskError::user_not_found(user_id));
        }

        if self.store.find_event(event_id).await?.is_none() {
            return Err(EventDeskError::event_not_found(event_id));
        }

        let updated = self
            .store
            .remove_registration(user_id, event_id)
            .await?
            .ok_or_else(|| EventDeskError::user_not_found(user_id))?;

        log_registration_change(user_id, "unregister", &[event_id.to_string()], updated.registered_events.len());
        Ok(updated)
    }

    /// The event and the name/email of everyone registered for it
    pub async fn event_details(&self, event_id: &str) -> Result<EventDetails> {
        let event = self
            .store
            .find_event(event_id)
            .await?
            .ok_or_else(|| EventDeskError::event_not_found(event_id))?;

        let registered_users = self
            .store
            .find_registered_users(event_id)
            .await?
            .into_iter()
            .map(RegisteredUser::from)
            .collect();

        Ok(EventDetails { event, registered_users })
    }

    /// Every user with registrations resolved to event records
    pub async fn list_users_with_events(&self) -> Result<Vec<UserWithEvents>> {
        let users = self.store.list_users().await?;

        let referenced: Vec<String> = users
            .iter()
            .flat_map(|user| user.registered_events.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let events: Vec<Event> = self.store.find_events(&referenced).await?;

        Ok(users
            .into_iter()
            .map(|user| UserWithEvents {
                registered_events: events
                    .iter()
                    .filter(|event| user.is_registered_for(&event.event_id))
                    .cloned()
                    .collect(),
                user_id: user.user_id,
                name: user.name,
                email: user.email,
            })
            .collect())
    }
}
