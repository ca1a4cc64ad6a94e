//! Enrollment repository implementation

use sqlx::{PgConnection, PgPool};
use chrono::Utc;
use crate::models::enrollment::{Enrollment, EnrollmentCounts, EnrollmentDetails, EnrollmentStatus};
use crate::utils::errors::CodeArenaError;

#[derive(Clone, Debug)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's enrollment in an event, whatever its status
    pub async fn find(&self, event_id: i64, user_id: i64) -> Result<Option<Enrollment>, CodeArenaError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "SELECT id, event_id, user_id, status, team_id, enrolled_at, updated_at FROM enrollments WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }

    /// Find and lock a user's enrollment inside a transaction
    pub async fn find_for_update(&self, conn: &mut PgConnection, event_id: i64, user_id: i64) -> Result<Option<Enrollment>, CodeArenaError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            "SELECT id, event_id, user_id, status, team_id, enrolled_at, updated_at FROM enrollments WHERE event_id = $1 AND user_id = $2 FOR UPDATE"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(enrollment)
    }

    /// Count enrollments holding a confirmed spot
    pub async fn count_enrolled(&self, conn: &mut PgConnection, event_id: i64) -> Result<i64, CodeArenaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments WHERE event_id = $1 AND status = $2"
        )
        .bind(event_id)
        .bind(EnrollmentStatus::Enrolled)
        .fetch_one(&mut *conn)
        .await?;

        Ok(count.0)
    }

    /// Insert a new enrollment
    pub async fn insert(&self, conn: &mut PgConnection, event_id: i64, user_id: i64, status: EnrollmentStatus) -> Result<Enrollment, CodeArenaError> {
        let now = Utc::now();
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            INSERT INTO enrollments (event_id, user_id, status, enrolled_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, event_id, user_id, status, team_id, enrolled_at, updated_at
            "#
        )
        .bind(event_id)
        .bind(user_id)
        .bind(status)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        Ok(enrollment)
    }

    /// Reactivate a cancelled enrollment. It re-enters the queue at the back.
    pub async fn reactivate(&self, conn: &mut PgConnection, id: i64, status: EnrollmentStatus) -> Result<Enrollment, CodeArenaError> {
        let now = Utc::now();
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET status = $2,
                team_id = NULL,
                enrolled_at = $3,
                updated_at = $3
            WHERE id = $1
            RETURNING id, event_id, user_id, status, team_id, enrolled_at, updated_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(now)
        .fetch_one(&mut *conn)
        .await?;

        Ok(enrollment)
    }

    /// Change enrollment status. Cancelling also drops the team association.
    pub async fn update_status(&self, conn: &mut PgConnection, id: i64, status: EnrollmentStatus) -> Result<Enrollment, CodeArenaError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET status = $2,
                team_id = CASE WHEN $2 = 'Cancelled' THEN NULL ELSE team_id END,
                updated_at = $3
            WHERE id = $1
            RETURNING id, event_id, user_id, status, team_id, enrolled_at, updated_at
            "#
        )
        .bind(id)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(enrollment)
    }

    /// Oldest waitlisted enrollment of an event, locked for promotion
    pub async fn next_waitlisted(&self, conn: &mut PgConnection, event_id: i64) -> Result<Option<Enrollment>, CodeArenaError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT id, event_id, user_id, status, team_id, enrolled_at, updated_at
            FROM enrollments
            WHERE event_id = $1 AND status = $2
            ORDER BY enrolled_at ASC, id ASC
            LIMIT 1
            FOR UPDATE
            "#
        )
        .bind(event_id)
        .bind(EnrollmentStatus::Waitlisted)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(enrollment)
    }

    /// Attach an enrollment to a team
    pub async fn set_team(&self, conn: &mut PgConnection, id: i64, team_id: i64) -> Result<Enrollment, CodeArenaError> {
        let enrollment = sqlx::query_as::<_, Enrollment>(
            r#"
            UPDATE enrollments
            SET team_id = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING id, event_id, user_id, status, team_id, enrolled_at, updated_at
            "#
        )
        .bind(id)
        .bind(team_id)
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        Ok(enrollment)
    }

    /// Get a user's enrollments with the given status, newest first
    pub async fn list_for_user(&self, user_id: i64, status: EnrollmentStatus) -> Result<Vec<Enrollment>, CodeArenaError> {
        let enrollments = sqlx::query_as::<_, Enrollment>(
            "SELECT id, event_id, user_id, status, team_id, enrolled_at, updated_at FROM enrollments WHERE user_id = $1 AND status = $2 ORDER BY enrolled_at DESC, id DESC"
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    /// Get a page of an event's enrollments with participant details, oldest first
    pub async fn list_for_event(&self, event_id: i64, status: EnrollmentStatus, limit: i64, offset: i64) -> Result<Vec<EnrollmentDetails>, CodeArenaError> {
        let enrollments = sqlx::query_as::<_, EnrollmentDetails>(
            r#"
            SELECT en.id, en.event_id, en.user_id, u.username, u.email, en.status, en.team_id, t.name AS team_name, en.enrolled_at
            FROM enrollments en
            INNER JOIN users u ON u.id = en.user_id
            LEFT JOIN teams t ON t.id = en.team_id
            WHERE en.event_id = $1 AND en.status = $2
            ORDER BY en.enrolled_at ASC, en.id ASC
            LIMIT $3 OFFSET $4
            "#
        )
        .bind(event_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    /// Count an event's enrollments with the given status
    pub async fn count_for_event(&self, event_id: i64, status: EnrollmentStatus) -> Result<i64, CodeArenaError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments WHERE event_id = $1 AND status = $2"
        )
        .bind(event_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0)
    }

    /// Aggregate counters for an event
    pub async fn counts(&self, event_id: i64) -> Result<EnrollmentCounts, CodeArenaError> {
        let counts = sqlx::query_as::<_, EnrollmentCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'Enrolled') AS enrolled,
                COUNT(*) FILTER (WHERE status = 'Waitlisted') AS waitlisted,
                COUNT(*) FILTER (WHERE status = 'Cancelled') AS cancelled,
                COUNT(*) FILTER (WHERE status = 'Enrolled' AND team_id IS NOT NULL) AS with_team
            FROM enrollments
            WHERE event_id = $1
            "#
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
