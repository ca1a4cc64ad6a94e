//! Enrollment model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Status of a participant's enrollment in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Cancelled,
    Waitlisted,
}

impl EnrollmentStatus {
    pub const ALL: [EnrollmentStatus; 3] = [
        EnrollmentStatus::Enrolled,
        EnrollmentStatus::Cancelled,
        EnrollmentStatus::Waitlisted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "Enrolled",
            EnrollmentStatus::Cancelled => "Cancelled",
            EnrollmentStatus::Waitlisted => "Waitlisted",
        }
    }

    /// Enrolled and waitlisted enrollments hold a place in the event
    pub fn is_active(&self) -> bool {
        !matches!(self, EnrollmentStatus::Cancelled)
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Enrolled" => Ok(EnrollmentStatus::Enrolled),
            "Cancelled" => Ok(EnrollmentStatus::Cancelled),
            "Waitlisted" => Ok(EnrollmentStatus::Waitlisted),
            _ => Err(ValidationError::new(
                ValidationErrorKind::InvalidStatus,
                "status",
                "Status must be one of: Enrolled, Cancelled, Waitlisted",
            )),
        }
    }
}

// Stored as TEXT
impl sqlx::Type<Postgres> for EnrollmentStatus {
    fn type_info() -> PgTypeInfo {
        <&str as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <&str as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, Postgres> for EnrollmentStatus {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> IsNull {
        <&str as sqlx::Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, Postgres> for EnrollmentStatus {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let raw = <&str as sqlx::Decode<'r, Postgres>>::decode(value)?;
        Ok(raw.parse()?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Enrollment {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub status: EnrollmentStatus,
    pub team_id: Option<i64>,
    pub enrolled_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrollment row joined with participant and team details, for organizers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EnrollmentDetails {
    pub id: i64,
    pub event_id: i64,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub status: EnrollmentStatus,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

/// Aggregated enrollment counters for the organizer dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentStats {
    pub event_id: i64,
    pub total: i64,
    pub enrolled: i64,
    pub waitlisted: i64,
    pub cancelled: i64,
    pub with_team: i64,
    pub without_team: i64,
    pub capacity: Option<i32>,
    pub spots_remaining: Option<i64>,
}

/// Raw counters as returned by the stats query
#[derive(Debug, Clone, Default, FromRow)]
pub struct EnrollmentCounts {
    pub total: i64,
    pub enrolled: i64,
    pub waitlisted: i64,
    pub cancelled: i64,
    pub with_team: i64,
}

impl EnrollmentStats {
    pub fn from_counts(event_id: i64, counts: EnrollmentCounts, capacity: Option<i32>) -> Self {
        let spots_remaining = capacity.map(|max| (max as i64 - counts.enrolled).max(0));

        Self {
            event_id,
            total: counts.total,
            enrolled: counts.enrolled,
            waitlisted: counts.waitlisted,
            cancelled: counts.cancelled,
            with_team: counts.with_team,
            without_team: counts.enrolled - counts.with_team,
            capacity,
            spots_remaining,
        }
    }
}

/// Result of cancelling an enrollment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancellationOutcome {
    pub cancelled: Enrollment,
    /// Waitlisted enrollment moved up into the freed spot
    pub promoted: Option<Enrollment>,
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: i64) -> Self {
        let total_pages = if total == 0 { 0 } else { (total + limit as i64 - 1) / limit as i64 };

        Self {
            items,
            page,
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_round_trip() {
        for status in EnrollmentStatus::ALL {
            assert_eq!(status.to_string().parse::<EnrollmentStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_serde_names() {
        assert_eq!(serde_json::to_string(&EnrollmentStatus::Waitlisted).unwrap(), "\"Waitlisted\"");
        assert_eq!(EnrollmentStatus::default(), EnrollmentStatus::Enrolled);
        assert!(!EnrollmentStatus::Cancelled.is_active());
        assert!(EnrollmentStatus::Waitlisted.is_active());
    }

    #[test]
    fn test_stats_from_counts() {
        let counts = EnrollmentCounts { total: 12, enrolled: 8, waitlisted: 3, cancelled: 1, with_team: 5 };
        let stats = EnrollmentStats::from_counts(4, counts, Some(10));
        assert_eq!(stats.without_team, 3);
        assert_eq!(stats.spots_remaining, Some(2));

        let counts = EnrollmentCounts { total: 2, enrolled: 2, ..Default::default() };
        let stats = EnrollmentStats::from_counts(4, counts, None);
        assert_eq!(stats.spots_remaining, None);
        assert_eq!(stats.without_team, 2);
    }

    #[test]
    fn test_page_total_pages() {
        let page: Page<i32> = Page::new(vec![], 1, 20, 0);
        assert_eq!(page.total_pages, 0);
        let page: Page<i32> = Page::new(vec![1], 3, 20, 41);
        assert_eq!(page.total_pages, 3);
        let page: Page<i32> = Page::new(vec![1], 1, 20, 40);
        assert_eq!(page.total_pages, 2);
    }
}
