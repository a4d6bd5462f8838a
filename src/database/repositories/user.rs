//! User repository implementation

use std::time::Instant;
use sqlx::PgPool;
use crate::database::repositories::map_unique_violation;
use crate::models::user::{User, CreateUserRequest};
use crate::utils::errors::EventDeskError;
use crate::utils::logging::log_database_operation;

const USER_COLUMNS: &str = "user_id, name, email, registered_events";

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user with no registrations
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, EventDeskError> {
        let started = Instant::now();
        let user_id = request.user_id.clone();
        let email = request.email.clone();

        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_id, name, email, registered_events)
            VALUES ($1, $2, $3, '{{}}')
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.user_id)
        .bind(request.name)
        .bind(request.email)
        .fetch_one(&self.pool)
        .await;

        log_database_operation("insert", "users", started.elapsed().as_millis() as u64, result.is_ok());
        result.map_err(|e| {
            map_unique_violation(e, |field| match field {
                "email" => email.clone(),
                _ => user_id.clone(),
            })
        })
    }

    /// Find user by business identifier
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, EventDeskError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, EventDeskError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, EventDeskError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, user_id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Users registered for the given event
    pub async fn find_registered_for(&self, event_id: &str) -> Result<Vec<User>, EventDeskError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE registered_events @> ARRAY[$1]::TEXT[] ORDER BY name COLLATE \"C\" ASC, user_id COLLATE \"C\" ASC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Union event identifiers into the user's registrations in one statement
    pub async fn add_registrations(&self, user_id: &str, event_ids: &[String]) -> Result<Option<User>, EventDeskError> {
        let started = Instant::now();

        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET registered_events = ARRAY(
                SELECT DISTINCT e FROM unnest(registered_events || $2::TEXT[]) AS e ORDER BY e COLLATE "C"
            )
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(event_ids)
        .fetch_optional(&self.pool)
        .await;

        log_database_operation("add_registrations", "users", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }

    /// Remove one event identifier from the user's registrations in one statement
    pub async fn remove_registration(&self, user_id: &str, event_id: &str) -> Result<Option<User>, EventDeskError> {
        let started = Instant::now();

        let result = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET registered_events = array_remove(registered_events, $2)
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;

        log_database_operation("remove_registration", "users", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }
}
