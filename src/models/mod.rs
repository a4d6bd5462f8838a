//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;

// Re-export commonly used models
pub use user::{User, CreateUserRequest, RegisterEventsRequest, RegisteredUser, UserWithEvents};
pub use event::{Event, CreateEventRequest, EventDetails};

use crate::utils::errors::Result;

/// Request bodies that check their own shape before reaching domain logic
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
