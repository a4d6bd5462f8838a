//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod event;
pub mod google;
pub mod registration;
pub mod user;

// Re-export commonly used services
pub use auth::{AuthService, Claims};
pub use event::EventService;
pub use google::{GoogleOAuthService, IdentityProfile};
pub use registration::RegistrationService;
pub use user::UserService;

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::EntityStore;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub store: Arc<dyn EntityStore>,
    pub event_service: EventService,
    pub user_service: UserService,
    pub registration_service: RegistrationService,
    pub auth_service: AuthService,
    pub google_service: GoogleOAuthService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one store
    pub fn new(settings: &Settings, store: Arc<dyn EntityStore>) -> Result<Self> {
        Ok(Self {
            event_service: EventService::new(store.clone()),
            user_service: UserService::new(store.clone()),
            registration_service: RegistrationService::new(store.clone()),
            auth_service: AuthService::new(&settings.auth, store.clone()),
            google_service: GoogleOAuthService::new(settings.google.clone())?,
            store,
        })
    }

    /// Health check for the backing store
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Store health check failed");
                false
            }
        };

        ServiceHealthStatus { database_healthy }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }
}
