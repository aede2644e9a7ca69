//! Apply database migrations and exit.
//!
//! Reads `DATABASE_URL` like the service does.

use subtrack_service::{telemetry, ServiceConfig};
use subtrack_store::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let config = ServiceConfig::from_env();
    let Some(url) = config.database_url.as_deref() else {
        return Err("DATABASE_URL must be set".into());
    };

    let store = PgStore::connect(url, 1).await?;
    let result = store.migrate().await;
    store.close().await;
    result?;

    tracing::info!("Migrations complete");
    Ok(())
}
