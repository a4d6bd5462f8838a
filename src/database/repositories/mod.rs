//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod event;

// Re-export repositories
pub use user::UserRepository;
pub use event::EventRepository;

use crate::utils::errors::EventDeskError;

/// Turn a unique-constraint violation into `DuplicateKey`; other errors pass through
pub(crate) fn map_unique_violation(err: sqlx::Error, value_for: impl Fn(&str) -> String) -> EventDeskError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err
                .constraint()
                .map(field_from_constraint)
                .unwrap_or("unknown")
                .to_string();
            let value = value_for(&field);
            return EventDeskError::DuplicateKey { field, value };
        }
    }

    EventDeskError::Database(err)
}

/// PostgreSQL names inline unique constraints `<table>_<column>_key`
fn field_from_constraint(constraint: &str) -> &str {
    match constraint {
        "events_event_id_key" => "event_id",
        "users_user_id_key" => "user_id",
        "users_email_key" => "email",
        other => other,
    }
}
