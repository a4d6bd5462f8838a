//! Entity store abstraction
//!
//! Handlers and services reach persistence only through this trait, so the
//! PostgreSQL store and the in-memory store are interchangeable.

use async_trait::async_trait;
use crate::models::{CreateEventRequest, CreateUserRequest, Event, User};
use crate::utils::errors::Result;

/// Persistence for events and users.
///
/// Creates fail with `DuplicateKey` and leave the store unchanged when a unique
/// field (`event_id`, `user_id`, `email`) is already taken. Registration
/// updates are applied as single atomic set operations on the stored user.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn create_event(&self, request: CreateEventRequest) -> Result<Event>;

    async fn find_event(&self, event_id: &str) -> Result<Option<Event>>;

    /// Events whose `event_id` is in `event_ids`; unknown ids are skipped
    async fn find_events(&self, event_ids: &[String]) -> Result<Vec<Event>>;

    /// All events ordered by date, then `event_id`
    async fn list_events(&self) -> Result<Vec<Event>>;

    async fn create_user(&self, request: CreateUserRequest) -> Result<User>;

    async fn find_user(&self, user_id: &str) -> Result<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn list_users(&self) -> Result<Vec<User>>;

    /// Users whose registrations contain `event_id`
    async fn find_registered_users(&self, event_id: &str) -> Result<Vec<User>>;

    /// Union `event_ids` into the user's registrations. `None` if the user is absent.
    async fn add_registrations(&self, user_id: &str, event_ids: &[String]) -> Result<Option<User>>;

    /// Remove `event_id` from the user's registrations. `None` if the user is absent.
    async fn remove_registration(&self, user_id: &str, event_id: &str) -> Result<Option<User>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<()>;
}
