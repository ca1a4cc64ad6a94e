//! Database connection management

use sqlx::{Pool, Postgres};
use std::time::Duration;
use crate::config::settings::DatabaseSettings;
use crate::utils::errors::CodeArenaError;

pub type DatabasePool = Pool<Postgres>;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgresql://localhost/codearena".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            max_lifetime: Some(Duration::from_secs(1800)),
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            acquire_timeout: Duration::from_secs(settings.acquire_timeout_seconds),
            ..Default::default()
        }
    }
}

fn pool_options(config: &DatabaseConfig) -> sqlx::postgres::PgPoolOptions {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
}

/// Create a new database connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, CodeArenaError> {
    let pool = pool_options(config).connect(&config.url).await?;

    // Test the connection
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await?;

    tracing::info!(max_connections = config.max_connections, "Database connection pool created successfully");
    Ok(pool)
}

/// Create a pool that connects on first use
pub fn create_lazy_pool(config: &DatabaseConfig) -> Result<DatabasePool, CodeArenaError> {
    let pool = pool_options(config).connect_lazy(&config.url)?;
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), CodeArenaError> {
    tracing::info!("Running database migrations...");
    
    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;
    
    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &DatabasePool) -> Result<(), CodeArenaError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await?;
    
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
        assert!(config.url.contains("postgresql://"));
    }

    #[test]
    fn test_database_config_from_settings() {
        let settings = DatabaseSettings {
            url: "postgresql://db.internal/arena".to_string(),
            max_connections: 25,
            min_connections: 2,
            acquire_timeout_seconds: 5,
        };
        let config = DatabaseConfig::from(&settings);
        assert_eq!(config.url, settings.url);
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(600)));
    }

    #[tokio::test]
    async fn test_lazy_pool_does_not_connect() {
        let config = DatabaseConfig {
            url: "postgresql://nobody@127.0.0.1:1/none".to_string(),
            min_connections: 0,
            ..Default::default()
        };
        let pool = create_lazy_pool(&config).unwrap();
        assert_eq!(pool.size(), 0);
    }
}
