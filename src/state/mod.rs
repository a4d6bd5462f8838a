//! Shared application state
//!
//! Everything a request handler needs, injected once at router construction.

use std::sync::Arc;
use crate::config::Settings;
use crate::database::EntityStore;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Build the state around the given store
    pub fn new(settings: Settings, store: Arc<dyn EntityStore>) -> Result<Self> {
        let services = ServiceFactory::new(&settings, store)?;
        Ok(Self {
            services,
            settings: Arc::new(settings),
        })
    }
}
