//! Test database helper utilities
//!
//! Database-backed tests run against the PostgreSQL instance named by
//! `TEST_DATABASE_URL` and are skipped when it is not set.

use sqlx::PgPool;

use codearena::database::{create_pool, run_migrations, DatabaseConfig, DatabaseService};
use codearena::state::AppState;

use super::{init_test_logging, test_settings};

/// Test database with migrations applied and all tables emptied
pub struct TestDatabase {
    pub pool: PgPool,
    pub db: DatabaseService,
    pub state: AppState,
}

impl TestDatabase {
    /// Connect to the test database, or `None` when none is configured
    pub async fn connect() -> Option<Self> {
        init_test_logging();

        if std::env::var("TEST_DATABASE_URL").is_err() {
            eprintln!("TEST_DATABASE_URL not set, skipping database test");
            return None;
        }

        let mut settings = test_settings();
        settings.database.acquire_timeout_seconds = 10;

        let pool = create_pool(&DatabaseConfig::from(&settings.database))
            .await
            .expect("Failed to connect to test database");

        run_migrations(&pool).await.expect("Failed to run migrations");

        let test_db = Self {
            db: DatabaseService::new(pool.clone()),
            state: AppState::new(&settings, pool.clone()),
            pool,
        };
        test_db.cleanup().await;

        Some(test_db)
    }

    /// Remove every row created by earlier tests
    pub async fn cleanup(&self) {
        sqlx::query("TRUNCATE enrollments, teams, events, users RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await
            .expect("Failed to clean test database");
    }
}
