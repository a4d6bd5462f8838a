//! Typed path parameters

use serde::Deserialize;
use crate::models::Validate;
use crate::utils::errors::Result;
use crate::utils::helpers::validate_identifier;

/// `:userId`
#[derive(Debug, Clone, Deserialize)]
pub struct UserPath {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// `:eventId`
#[derive(Debug, Clone, Deserialize)]
pub struct EventPath {
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// `:userId` and `:eventId`
#[derive(Debug, Clone, Deserialize)]
pub struct UserEventPath {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "eventId")]
    pub event_id: String,
}

impl Validate for UserPath {
    fn validate(&self) -> Result<()> {
        validate_identifier("userId", &self.user_id)
    }
}

impl Validate for EventPath {
    fn validate(&self) -> Result<()> {
        validate_identifier("eventId", &self.event_id)
    }
}

impl Validate for UserEventPath {
    fn validate(&self) -> Result<()> {
        validate_identifier("userId", &self.user_id)?;
        validate_identifier("eventId", &self.event_id)
    }
}
