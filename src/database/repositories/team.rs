//! Team repository implementation

use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use crate::models::team::{Team, TeamSummary};
use crate::utils::errors::CodeArenaError;

#[derive(Clone, Debug)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new team
    pub async fn create(&self, conn: &mut PgConnection, event_id: i64, name: &str, created_by: i64) -> Result<Team, CodeArenaError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (event_id, name, created_by, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, event_id, name, created_by, created_at
            "#
        )
        .bind(event_id)
        .bind(name)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(team)
    }

    /// Find team by ID
    pub async fn find_by_id(&self, conn: &mut PgConnection, id: i64) -> Result<Option<Team>, CodeArenaError> {
        let team = sqlx::query_as::<_, Team>(
            "SELECT id, event_id, name, created_by, created_at FROM teams WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(team)
    }

    /// Check whether a team name is already used within an event (case-insensitive)
    pub async fn name_exists(&self, conn: &mut PgConnection, event_id: i64, name: &str) -> Result<bool, CodeArenaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM teams WHERE event_id = $1 AND LOWER(name) = LOWER($2)"
        )
        .bind(event_id)
        .bind(name)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count.0 > 0)
    }

    /// Number of enrolled members of a team
    pub async fn member_count(&self, conn: &mut PgConnection, team_id: i64) -> Result<i64, CodeArenaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments WHERE team_id = $1 AND status = 'Enrolled'"
        )
        .bind(team_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count.0)
    }

    /// Get an event's teams with member counts
    pub async fn list_for_event(&self, event_id: i64) -> Result<Vec<TeamSummary>, CodeArenaError> {
        let teams = sqlx::query_as::<_, TeamSummary>(
            r#"
            SELECT t.id, t.event_id, t.name, COUNT(en.id) AS member_count, t.created_at
            FROM teams t
            LEFT JOIN enrollments en ON en.team_id = t.id AND en.status = 'Enrolled'
            WHERE t.event_id = $1
            GROUP BY t.id
            ORDER BY t.created_at ASC, t.id ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }
}
