//! Club Server - Maintenance Entry Point
//!
//! Applies migrations, checks the configured role ids against the `roles`
//! table and purges stale password reset tokens.

use anyhow::Result;
use tracing::{info, warn};

use club_server::{auth, config, db, observability, permissions};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first so RUST_LOG set there reaches the filter
    dotenvy::dotenv().ok();
    observability::init_tracing();

    // Load configuration
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        admin_role_id = config.role_ids.admin,
        dev_role_id = config.role_ids.dev,
        "Starting club maintenance"
    );

    // Initialize database
    let db_pool = db::create_pool(&config.database_url, config.max_connections).await?;
    db::run_migrations(&db_pool).await?;

    let drift = permissions::verify_role_ids(&db_pool, &config.role_ids).await?;
    if drift.is_empty() {
        info!("Privileged role ids verified");
    }
    for issue in &drift {
        warn!(error = %issue, "Privileged role id does not match the roles table");
    }

    let purged = auth::cleanup_expired_reset_tokens(&db_pool).await?;
    info!(purged, "Expired password reset tokens removed");

    db_pool.close().await;
    info!("Maintenance complete");
    Ok(())
}
