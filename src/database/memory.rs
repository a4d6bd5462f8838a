//! In-memory entity store
//!
//! Same semantics as the PostgreSQL store, backed by ordered maps behind a
//! lock. Used by the test suites and anywhere a database is not wanted.

use std::collections::{BTreeMap, BTreeSet};
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::database::EntityStore;
use crate::models::{CreateEventRequest, CreateUserRequest, Event, User};
use crate::utils::errors::{EventDeskError, Result};

#[derive(Debug, Default)]
struct Collections {
    events: BTreeMap<String, Event>,
    users: BTreeMap<String, StoredUser>,
    /// insertion order of user ids
    user_order: Vec<String>,
}

#[derive(Debug, Clone)]
struct StoredUser {
    user_id: String,
    name: String,
    email: String,
    registered_events: BTreeSet<String>,
}

impl From<&StoredUser> for User {
    fn from(stored: &StoredUser) -> Self {
        User {
            user_id: stored.user_id.clone(),
            name: stored.name.clone(),
            email: stored.email.clone(),
            registered_events: stored.registered_events.iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let mut inner = self.inner.write().await;

        if inner.events.contains_key(&request.event_id) {
            return Err(EventDeskError::DuplicateKey {
                field: "event_id".to_string(),
                value: request.event_id,
            });
        }

        let event = Event {
            event_id: request.event_id,
            event_name: request.event_name,
            description: request.description,
            date: request.date,
            pic_link: request.pic_link,
        };
        inner.events.insert(event.event_id.clone(), event.clone());
        Ok(event)
    }

    async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.inner.read().await.events.get(event_id).cloned())
    }

    async fn find_events(&self, event_ids: &[String]) -> Result<Vec<Event>> {
        let inner = self.inner.read().await;
        let wanted: BTreeSet<&str> = event_ids.iter().map(String::as_str).collect();

        Ok(wanted
            .into_iter()
            .filter_map(|id| inner.events.get(id).cloned())
            .collect())
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self.inner.read().await.events.values().cloned().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.event_id.cmp(&b.event_id)));
        Ok(events)
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let mut inner = self.inner.write().await;

        if inner.users.contains_key(&request.user_id) {
            return Err(EventDeskError::DuplicateKey {
                field: "user_id".to_string(),
                value: request.user_id,
            });
        }

        if inner.users.values().any(|user| user.email == request.email) {
            return Err(EventDeskError::DuplicateKey {
                field: "email".to_string(),
                value: request.email,
            });
        }

        let stored = StoredUser {
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            registered_events: BTreeSet::new(),
        };
        let user = User::from(&stored);
        inner.user_order.push(stored.user_id.clone());
        inner.users.insert(stored.user_id.clone(), stored);
        Ok(user)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(user_id).map(User::from))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .read()
            .await
            .users
            .values()
            .find(|user| user.email == email)
            .map(User::from))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .user_order
            .iter()
            .filter_map(|id| inner.users.get(id))
            .map(User::from)
            .collect())
    }

    async fn find_registered_users(&self, event_id: &str) -> Result<Vec<User>> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner
            .users
            .values()
            .filter(|user| user.registered_events.contains(event_id))
            .map(User::from)
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.user_id.cmp(&b.user_id)));
        Ok(users)
    }

    async fn add_registrations(&self, user_id: &str, event_ids: &[String]) -> Result<Option<User>> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(user_id).map(|user| {
            user.registered_events.extend(event_ids.iter().cloned());
            User::from(&*user)
        }))
    }

    async fn remove_registration(&self, user_id: &str, event_id: &str) -> Result<Option<User>> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(user_id).map(|user| {
            user.registered_events.remove(event_id);
            User::from(&*user)
        }))
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
