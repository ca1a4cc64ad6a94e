//! CodeArena enrollment service
//!
//! Main application entry point

use anyhow::Context;
use tracing::info;

use codearena::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseConfig},
    http::HttpServer,
    state::AppState,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = logging::init_logging(&settings.logging).context("failed to initialize logging")?;

    info!("Starting {}...", codearena::info());

    info!("Connecting to database...");
    let pool = create_pool(&DatabaseConfig::from(&settings.database))
        .await
        .context("failed to connect to database")?;

    run_migrations(&pool).await.context("failed to run migrations")?;

    let state = AppState::new(&settings, pool);
    let server = HttpServer::new(&settings, state);

    server.start().await.context("HTTP server failed")?;

    info!("CodeArena has been shut down.");
    Ok(())
}
