//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{User, CreateUserRequest};
use crate::utils::errors::CodeArenaError;

#[derive(Clone, Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, CodeArenaError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, role, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, role, created_at
            "#
        )
        .bind(request.username)
        .bind(request.email)
        .bind(request.role.unwrap_or_else(|| "participant".to_string()))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, CodeArenaError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, role, created_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
