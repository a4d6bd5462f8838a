//! EventDesk HTTP server
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use EventDesk::{
    config::Settings,
    create_router,
    database::{self, DatabaseService, EntityStore},
    utils::{errors::log_fatal, logging},
    AppState, EventDeskError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", EventDesk::info());

    let store = match connect_store(&settings).await {
        Ok(store) => store,
        Err(e) => {
            log_fatal(&e);
            return Err(e.into());
        }
    };

    let address = settings.bind_address();
    let state = AppState::new(settings, store)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("EventDesk has been shut down.");
    Ok(())
}

/// Connect to Postgres, apply migrations and wrap the pool as the entity store
async fn connect_store(settings: &Settings) -> Result<Arc<dyn EntityStore>, EventDeskError> {
    info!("Connecting to database...");
    let db_config = database::DatabaseConfig::from(&settings.database);
    let pool = database::create_pool(&db_config).await?;

    info!("Running database migrations...");
    database::run_migrations(&pool).await?;

    Ok(Arc::new(DatabaseService::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
