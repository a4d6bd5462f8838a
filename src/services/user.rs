//! User service implementation
//! 
//! This service handles explicit user creation, lookups, and mapping a
//! provider identity onto an internal user on first sign-in.

use std::sync::Arc;
use tracing::{info, debug};
use crate::database::EntityStore;
use crate::models::user::{User, CreateUserRequest};
use crate::services::google::IdentityProfile;
use crate::utils::errors::{EventDeskError, Result};
use crate::utils::helpers::normalize_whitespace;
use crate::utils::logging::log_entity_created;

/// Prefix of `user_id`s assigned to users created through Google sign-in
pub const GOOGLE_USER_ID_PREFIX: &str = "google-";

/// Deterministic `user_id` for a provider subject
pub fn derive_user_id(subject: &str) -> String {
    format!("{}{}", GOOGLE_USER_ID_PREFIX, subject)
}

/// User service for managing user operations
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn EntityStore>,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Create a user with an empty registration set
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let user = self.store.create_user(request).await?;
        log_entity_created("user", &user.user_id);
        Ok(user)
    }

    /// Get user by business identifier
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        debug!(user_id = user_id, "Getting user by ID");
        self.store.find_user(user_id).await
    }

    /// Map a provider identity to a user, creating one on first sight.
    ///
    /// Users are matched by email. A new user gets `user_id = "google-<subject>"`,
    /// the provider display name (or the email's local part when absent) and no
    /// registrations.
    pub async fn resolve_or_create_user(&self, profile: &IdentityProfile) -> Result<User> {
        if let Some(existing) = self.store.find_user_by_email(&profile.email).await? {
            debug!(user_id = %existing.user_id, "Existing user signed in");
            return Ok(existing);
        }

        let request = CreateUserRequest {
            user_id: derive_user_id(&profile.subject),
            name: display_name_for(profile),
            email: profile.email.clone(),
        };

        match self.store.create_user(request).await {
            Ok(user) => {
                info!(user_id = %user.user_id, "New user created from Google sign-in");
                log_entity_created("user", &user.user_id);
                Ok(user)
            }
            // a concurrent sign-in created the same user first
            Err(EventDeskError::DuplicateKey { field, .. }) if field == "email" => self
                .store
                .find_user_by_email(&profile.email)
                .await?
                .ok_or_else(|| EventDeskError::user_not_found(profile.email.clone())),
            // same Google account, email changed since the user was created
            Err(EventDeskError::DuplicateKey { field, .. }) if field == "user_id" => {
                let user_id = derive_user_id(&profile.subject);
                self.store
                    .find_user(&user_id)
                    .await?
                    .ok_or_else(|| EventDeskError::user_not_found(user_id))
            }
            Err(e) => Err(e),
        }
    }
}

fn display_name_for(profile: &IdentityProfile) -> String {
    profile
        .display_name
        .as_deref()
        .map(normalize_whitespace)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| {
            profile
                .email
                .split('@')
                .next()
                .unwrap_or(profile.email.as_str())
                .to_string()
        })
}
