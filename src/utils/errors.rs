//! Error handling for EventDesk
//!
//! This module defines the main error type used throughout the application
//! and the mapping from domain failures to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Main error type for EventDesk
#[derive(Error, Debug)]
pub enum EventDeskError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Duplicate value for unique field {field}: {value}")]
    DuplicateKey { field: String, value: String },

    #[error("Some events do not exist: {}", .0.join(", "))]
    InvalidReference(Vec<String>),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for EventDesk operations
pub type Result<T> = std::result::Result<T, EventDeskError>;

impl EventDeskError {
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        EventDeskError::NotFound { entity: "User", id: user_id.into() }
    }

    pub fn event_not_found(event_id: impl Into<String>) -> Self {
        EventDeskError::NotFound { entity: "Event", id: event_id.into() }
    }

    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            EventDeskError::Database(_) => false,
            EventDeskError::Migration(_) => false,
            EventDeskError::NotFound { .. } => false,
            EventDeskError::DuplicateKey { .. } => false,
            EventDeskError::InvalidReference(_) => false,
            EventDeskError::Unauthenticated(_) => false,
            EventDeskError::Validation(_) => false,
            EventDeskError::Token(_) => false,
            EventDeskError::IdentityProvider(_) => true,
            EventDeskError::Config(_) => false,
            EventDeskError::Http(_) => true,
            EventDeskError::Serialization(_) => false,
            EventDeskError::Io(_) => true,
            EventDeskError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EventDeskError::Database(_) => ErrorSeverity::Critical,
            EventDeskError::Migration(_) => ErrorSeverity::Critical,
            EventDeskError::Config(_) => ErrorSeverity::Critical,
            EventDeskError::Unauthenticated(_) => ErrorSeverity::Warning,
            EventDeskError::Token(_) => ErrorSeverity::Warning,
            EventDeskError::NotFound { .. } => ErrorSeverity::Info,
            EventDeskError::DuplicateKey { .. } => ErrorSeverity::Info,
            EventDeskError::InvalidReference(_) => ErrorSeverity::Info,
            EventDeskError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status code this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventDeskError::NotFound { .. } => StatusCode::NOT_FOUND,
            EventDeskError::DuplicateKey { .. }
            | EventDeskError::InvalidReference(_)
            | EventDeskError::Validation(_) => StatusCode::BAD_REQUEST,
            EventDeskError::Unauthenticated(_) | EventDeskError::Token(_) => StatusCode::UNAUTHORIZED,
            EventDeskError::IdentityProvider(_) | EventDeskError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients. Server-side details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            EventDeskError::InvalidReference(_) => "Some events do not exist".to_string(),
            EventDeskError::Token(_) => "Invalid or expired token".to_string(),
            EventDeskError::IdentityProvider(_) | EventDeskError::Http(_) => {
                "Identity provider request failed".to_string()
            }
            err if err.status_code().is_server_error() => "Internal server error".to_string(),
            err => err.to_string(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(rename = "invalidEventIds", skip_serializing_if = "Option::is_none")]
    pub invalid_event_ids: Option<Vec<String>>,
}

impl IntoResponse for EventDeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.severity() {
            ErrorSeverity::Critical | ErrorSeverity::Error => {
                error!(status = %status, severity = %self.severity(), error = %self, "Request failed");
            }
            ErrorSeverity::Warning => warn!(status = %status, error = %self, "Request rejected"),
            ErrorSeverity::Info => debug!(status = %status, error = %self, "Request rejected"),
        }

        let invalid_event_ids = match &self {
            EventDeskError::InvalidReference(ids) => Some(ids.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            message: self.user_message(),
            invalid_event_ids,
        };

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Log a startup failure before the process exits
pub fn log_fatal(err: &EventDeskError) {
    error!(severity = %err.severity(), recoverable = err.is_recoverable(), error = %err, "Fatal startup error");
    info!("EventDesk is not serving traffic");
}
