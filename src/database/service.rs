//! Database service layer
//! 
//! PostgreSQL-backed `EntityStore` composed from the repositories

use async_trait::async_trait;
use crate::database::{DatabasePool, EntityStore, EventRepository, UserRepository};
use crate::models::*;
use crate::utils::errors::Result;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub events: EventRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl EntityStore for DatabaseService {
    async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        self.events.create(request).await
    }

    async fn find_event(&self, event_id: &str) -> Result<Option<Event>> {
        self.events.find_by_event_id(event_id).await
    }

    async fn find_events(&self, event_ids: &[String]) -> Result<Vec<Event>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.events.find_by_event_ids(event_ids).await
    }

    async fn list_events(&self) -> Result<Vec<Event>> {
        self.events.list().await
    }

    async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        self.users.create(request).await
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        self.users.find_by_user_id(user_id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.users.find_by_email(email).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    async fn find_registered_users(&self, event_id: &str) -> Result<Vec<User>> {
        self.users.find_registered_for(event_id).await
    }

    async fn add_registrations(&self, user_id: &str, event_ids: &[String]) -> Result<Option<User>> {
        self.users.add_registrations(user_id, event_ids).await
    }

    async fn remove_registration(&self, user_id: &str, event_id: &str) -> Result<Option<User>> {
        self.users.remove_registration(user_id, event_id).await
    }

    async fn ping(&self) -> Result<()> {
        crate::database::health_check(&self.pool).await
    }
}
