//! Subtrack Service - HTTP API for subscription records and cost totals.
//!
//! This is the main entry point for the subtrack service.

use std::sync::Arc;

use subtrack_service::{create_router, shutdown, telemetry, AppState, ServiceConfig};
use subtrack_store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    tracing::info!("Starting Subtrack Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_configured = %config.database_url.is_some(),
        run_migrations = %config.run_migrations,
        "Service configuration loaded"
    );

    // Acquire the store for the lifetime of the process
    let pg = match &config.database_url {
        Some(url) => {
            let pg = PgStore::connect(url, config.db_max_connections).await?;
            if config.run_migrations {
                pg.migrate().await?;
            }
            Some(pg)
        }
        None => {
            tracing::warn!("DATABASE_URL not set - using in-memory store, data will not persist");
            None
        }
    };

    let store: Arc<dyn Store> = match &pg {
        Some(pg) => Arc::new(pg.clone()),
        None => Arc::new(MemoryStore::new()),
    };

    // Build app state
    let state = AppState::new(store, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;

    // Release the store
    if let Some(pg) = pg {
        pg.close().await;
    }

    tracing::info!("Subtrack Service stopped");

    Ok(())
}
