//! Event repository implementation

use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use crate::models::event::{Event, CreateEventRequest};
use crate::utils::errors::CodeArenaError;

#[derive(Clone, Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, CodeArenaError> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (title, description, rules, start_date, end_date, max_participants, max_team_size, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING id, title, description, rules, start_date, end_date, max_participants, max_team_size, is_active, created_by, created_at, updated_at
            "#
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.rules)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.max_participants)
        .bind(request.max_team_size)
        .bind(request.created_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, CodeArenaError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, rules, start_date, end_date, max_participants, max_team_size, is_active, created_by, created_at, updated_at FROM events WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID and lock its row until the transaction ends.
    ///
    /// Capacity-sensitive writes for one event are serialized on this lock.
    pub async fn lock_for_update(&self, conn: &mut PgConnection, id: i64) -> Result<Option<Event>, CodeArenaError> {
        let event = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, rules, start_date, end_date, max_participants, max_team_size, is_active, created_by, created_at, updated_at FROM events WHERE id = $1 FOR UPDATE"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(event)
    }

    /// List active events with pagination, soonest first
    pub async fn list_active(&self, limit: i64, offset: i64) -> Result<Vec<Event>, CodeArenaError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT id, title, description, rules, start_date, end_date, max_participants, max_team_size, is_active, created_by, created_at, updated_at FROM events WHERE is_active = true ORDER BY start_date ASC, id ASC LIMIT $1 OFFSET $2"
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Count active events
    pub async fn count_active(&self) -> Result<i64, CodeArenaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM events WHERE is_active = true")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
