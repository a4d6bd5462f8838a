//! Store whose reachability can be switched off

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use EventDesk::models::{CreateEventRequest, CreateUserRequest, Event, User};
use EventDesk::{EntityStore, EventDeskError, InMemoryStore, Result};

/// `InMemoryStore` whose `ping` fails while marked unreachable
#[derive(Debug, Default)]
pub struct ToggleStore {
    inner: InMemoryStore,
    unreachable: AtomicBool,
}

impl ToggleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl EntityStore for ToggleStore {
    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.inner.create_event(request).await
    }

    async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        self.inner.find_event(event_id).await
    }

    async fn find_events(&self, event_ids: &[String]) -> Result<Vec<Event>> {
        self.inner.find_events(event_ids).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.inner.list_events().await
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        self.inner.create_user(request).await
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        self.inner.find_user(user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.inner.list_users().await
    }

    async fn find_registered_users(&self, event_id: &str) -> Result<Vec<User>> {
        self.inner.find_registered_users(event_id).await
    }

    async fn add_registrations(&self, user_id: &str, event_ids: &[String]) -> Result<Option<User>> {
        self.inner.add_registrations(user_id, event_ids).await
    }

    async fn remove_registration(&self, user_id: &str, event_id: &str) -> Result<Option<User>> {
        self.inner.remove_registration(user_id, event_id).await
    }

    async fn ping(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(EventDeskError::Database(sqlx::Error::PoolTimedOut));
        }
        self.inner.ping().await
    }
}
