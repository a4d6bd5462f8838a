//! Event model

use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::models::{RegisteredUser, Validate};
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::{
    is_valid_http_url, parse_flexible_date, validate_free_text, validate_identifier, validate_name,
};

/// An event users can register for, identified by its business `event_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub event_id: String,
    pub event_name: String,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub pic_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub event_id: String,
    pub event_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub pic_link: Option<String>,
}

/// An event together with the users registered for it
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub event: Event,
    pub registered_users: Vec<RegisteredUser>,
}

impl Validate for CreateEventRequest {
    fn validate(&self) -> Result<()> {
        validate_identifier("event_id", &self.event_id)?;
        validate_name("event_name", &self.event_name)?;

        if let Some(description) = &self.description {
            validate_free_text("description", description)?;
        }

        if let Some(link) = &self.pic_link {
            if link.chars().any(char::is_control) || !is_valid_http_url(link) {
                return Err(EventDeskError::Validation(format!("pic_link is not a valid URL: {}", link)));
            }
        }

        Ok(())
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flexible_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}
