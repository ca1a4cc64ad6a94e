//! Enrollment service implementation
//!
//! Business rules behind the enrollment endpoints: capacity and waitlist
//! handling, cancellation with waitlist promotion, team association,
//! listings and organizer statistics. Inputs arrive already validated.

use tracing::{debug, info};
use crate::config::settings::EnrollmentSettings;
use crate::database::DatabaseService;
use crate::models::enrollment::{
    CancellationOutcome, Enrollment, EnrollmentDetails, EnrollmentStats, EnrollmentStatus, Page,
};
use crate::models::event::Event;
use crate::services::auth::AuthContext;
use crate::utils::errors::{CodeArenaError, Result};
use crate::utils::logging;
use crate::validation::{EventEnrollmentsRequest, EventId, UpdateTeamRequest, UserEnrollmentsRequest};

/// Pick the status a new enrollment starts with
pub fn initial_status(event: &Event, enrolled: i64, waitlist_enabled: bool) -> Result<EnrollmentStatus> {
    if !event.is_full(enrolled) {
        return Ok(EnrollmentStatus::Enrolled);
    }

    if waitlist_enabled {
        Ok(EnrollmentStatus::Waitlisted)
    } else {
        Err(CodeArenaError::EnrollmentClosed { event_id: event.id })
    }
}

#[derive(Clone)]
pub struct EnrollmentService {
    db: DatabaseService,
    settings: EnrollmentSettings,
}

impl EnrollmentService {
    /// Create a new EnrollmentService instance
    pub fn new(db: DatabaseService, settings: EnrollmentSettings) -> Self {
        Self { db, settings }
    }

    /// Enroll the caller in an event, waitlisting when the event is full
    pub async fn enroll(&self, auth: &AuthContext, event_id: EventId) -> Result<Enrollment> {
        let event_id = event_id.get();
        let mut tx = self.db.begin().await?;

        let event = self.db.events.lock_for_update(&mut tx, event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })?;

        if !event.is_active {
            return Err(CodeArenaError::EnrollmentClosed { event_id });
        }

        let existing = self.db.enrollments.find_for_update(&mut tx, event_id, auth.user_id).await?;
        if let Some(ref enrollment) = existing {
            if enrollment.status.is_active() {
                return Err(CodeArenaError::AlreadyEnrolled { event_id });
            }
        }

        let enrolled = self.db.enrollments.count_enrolled(&mut tx, event_id).await?;
        let status = initial_status(&event, enrolled, self.settings.waitlist_enabled)?;

        let enrollment = match existing {
            Some(cancelled) => self.db.enrollments.reactivate(&mut tx, cancelled.id, status).await?,
            None => self.db.enrollments.insert(&mut tx, event_id, auth.user_id, status).await?,
        };

        tx.commit().await?;

        logging::log_enrollment_action(event_id, auth.user_id, "enroll", enrollment.status);
        Ok(enrollment)
    }

    /// Cancel the caller's enrollment, promoting the oldest waitlisted participant
    /// into the freed spot
    pub async fn cancel(&self, auth: &AuthContext, event_id: EventId) -> Result<CancellationOutcome> {
        let event_id = event_id.get();
        let mut tx = self.db.begin().await?;

        let event = self.db.events.lock_for_update(&mut tx, event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })?;

        let enrollment = self.db.enrollments.find_for_update(&mut tx, event_id, auth.user_id).await?
            .filter(|e| e.status.is_active())
            .ok_or(CodeArenaError::EnrollmentNotFound { event_id })?;

        let held_spot = enrollment.status == EnrollmentStatus::Enrolled;
        let cancelled = self.db.enrollments
            .update_status(&mut tx, enrollment.id, EnrollmentStatus::Cancelled)
            .await?;

        let mut promoted = None;
        if held_spot {
            let enrolled = self.db.enrollments.count_enrolled(&mut tx, event_id).await?;
            if !event.is_full(enrolled) {
                if let Some(next) = self.db.enrollments.next_waitlisted(&mut tx, event_id).await? {
                    let next = self.db.enrollments
                        .update_status(&mut tx, next.id, EnrollmentStatus::Enrolled)
                        .await?;
                    promoted = Some(next);
                }
            }
        }

        tx.commit().await?;

        logging::log_enrollment_action(event_id, auth.user_id, "cancel", cancelled.status);
        if let Some(ref next) = promoted {
            logging::log_waitlist_promotion(event_id, next.user_id, auth.user_id);
        }

        Ok(CancellationOutcome { cancelled, promoted })
    }

    /// Change the team of the caller's enrollment. `None` leaves it untouched.
    pub async fn update_team(&self, auth: &AuthContext, request: UpdateTeamRequest) -> Result<Enrollment> {
        let event_id = request.event_id.get();

        let Some(team_id) = request.team_id else {
            debug!(event_id = event_id, user_id = auth.user_id, "No team change requested");
            return self.db.enrollments.find(event_id, auth.user_id).await?
                .filter(|e| e.status.is_active())
                .ok_or(CodeArenaError::EnrollmentNotFound { event_id });
        };
        let team_id = team_id.get();

        let mut tx = self.db.begin().await?;

        let event = self.db.events.lock_for_update(&mut tx, event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })?;

        let enrollment = self.db.enrollments.find_for_update(&mut tx, event_id, auth.user_id).await?
            .filter(|e| e.status.is_active())
            .ok_or(CodeArenaError::EnrollmentNotFound { event_id })?;

        if enrollment.status != EnrollmentStatus::Enrolled {
            return Err(CodeArenaError::InvalidStateTransition {
                from: enrollment.status.to_string(),
                to: "team member".to_string(),
            });
        }

        let team = self.db.teams.find_by_id(&mut tx, team_id).await?
            .filter(|t| t.event_id == event_id)
            .ok_or(CodeArenaError::TeamNotFound { team_id })?;

        if enrollment.team_id == Some(team.id) {
            tx.commit().await?;
            return Ok(enrollment);
        }

        let members = self.db.teams.member_count(&mut tx, team.id).await?;
        if members >= event.max_team_size as i64 {
            return Err(CodeArenaError::TeamFull { team_id: team.id, max_size: event.max_team_size });
        }

        let updated = self.db.enrollments.set_team(&mut tx, enrollment.id, team.id).await?;
        tx.commit().await?;

        logging::log_team_action(event_id, team.id, "join", auth.user_id);
        Ok(updated)
    }

    /// The caller's enrollments with the requested status
    pub async fn list_for_user(&self, auth: &AuthContext, request: UserEnrollmentsRequest) -> Result<Vec<Enrollment>> {
        self.db.enrollments.list_for_user(auth.user_id, request.status).await
    }

    /// A page of an event's enrollments. Organizers and admins only.
    pub async fn list_for_event(&self, auth: &AuthContext, request: EventEnrollmentsRequest) -> Result<Page<EnrollmentDetails>> {
        auth.require_organizer("list event enrollments")?;

        let event_id = request.event_id.get();
        self.require_event(event_id).await?;

        let pagination = request.pagination;
        let total = self.db.enrollments.count_for_event(event_id, pagination.status).await?;
        let items = self.db.enrollments
            .list_for_event(event_id, pagination.status, pagination.limit as i64, pagination.offset())
            .await?;

        Ok(Page::new(items, pagination.page, pagination.limit, total))
    }

    /// Enrollment statistics of an event. Organizers and admins only.
    pub async fn stats(&self, auth: &AuthContext, event_id: EventId) -> Result<EnrollmentStats> {
        auth.require_stats_viewer("view enrollment statistics")?;

        let event = self.require_event(event_id.get()).await?;
        let counts = self.db.enrollments.counts(event.id).await?;

        info!(event_id = event.id, total = counts.total, "Enrollment statistics computed");
        Ok(EnrollmentStats::from_counts(event.id, counts, event.max_participants))
    }

    async fn require_event(&self, event_id: i64) -> Result<Event> {
        self.db.events.find_by_id(event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Utc;

    fn event(max_participants: Option<i32>) -> Event {
        Event {
            id: 5,
            title: "Arena Finals".to_string(),
            description: None,
            rules: None,
            start_date: Utc::now(),
            end_date: Utc::now(),
            max_participants,
            max_team_size: 4,
            is_active: true,
            created_by: Some(1),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_initial_status_with_room() {
        assert_eq!(initial_status(&event(Some(10)), 9, true).unwrap(), EnrollmentStatus::Enrolled);
        assert_eq!(initial_status(&event(None), 500, false).unwrap(), EnrollmentStatus::Enrolled);
    }

    #[test]
    fn test_initial_status_when_full() {
        assert_eq!(initial_status(&event(Some(10)), 10, true).unwrap(), EnrollmentStatus::Waitlisted);
        assert_matches!(
            initial_status(&event(Some(10)), 10, false),
            Err(CodeArenaError::EnrollmentClosed { event_id: 5 })
        );
    }
}
