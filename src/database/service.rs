//! Database service layer
//!
//! This module provides a high-level interface to database operations

use sqlx::{Postgres, Transaction};
use crate::database::{DatabasePool, UserRepository, EventRepository, EnrollmentRepository, TeamRepository};
use crate::utils::errors::CodeArenaError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub events: EventRepository,
    pub enrollments: EnrollmentRepository,
    pub teams: TeamRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            enrollments: EnrollmentRepository::new(pool.clone()),
            teams: TeamRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction on the shared pool
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, CodeArenaError> {
        Ok(self.pool.begin().await?)
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}
