//! User model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use crate::models::{Event, Validate};
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::{is_valid_email, validate_identifier, validate_name};

/// A user and the `event_id`s they are registered for.
///
/// `registered_events` is kept sorted and free of duplicates by every store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub registered_events: Vec<String>,
}

impl User {
    pub fn is_registered_for(&self, event_id: &str) -> bool {
        self.registered_events.binary_search_by(|id| id.as_str().cmp(event_id)).is_ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEventsRequest {
    #[serde(alias = "eventIds")]
    pub event_ids: Vec<String>,
}

/// Public projection of a user listed under an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RegisteredUser {
    pub name: String,
    pub email: String,
}

impl From<User> for RegisteredUser {
    fn from(user: User) -> Self {
        Self { name: user.name, email: user.email }
    }
}

/// A user with `registered_events` resolved to full event records
#[derive(Debug, Clone, Serialize)]
pub struct UserWithEvents {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub registered_events: Vec<Event>,
}

impl Validate for CreateUserRequest {
    fn validate(&self) -> Result<()> {
        validate_identifier("user_id", &self.user_id)?;
        validate_name("name", &self.name)?;

        if !is_valid_email(&self.email) {
            return Err(EventDeskError::Validation(format!("email is not valid: {}", self.email)));
        }

        Ok(())
    }
}

impl Validate for RegisterEventsRequest {
    fn validate(&self) -> Result<()> {
        for id in &self.event_ids {
            validate_identifier("event_ids", id)?;
        }

        Ok(())
    }
}
