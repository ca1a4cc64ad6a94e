//! Team service implementation

use crate::database::DatabaseService;
use crate::models::enrollment::EnrollmentStatus;
use crate::models::team::{Team, TeamStats, TeamSummary};
use crate::services::auth::AuthContext;
use crate::utils::errors::{CodeArenaError, Result};
use crate::utils::logging;
use crate::validation::{CreateTeamRequest, EventId};

#[derive(Clone)]
pub struct TeamService {
    db: DatabaseService,
}

impl TeamService {
    /// Create a new TeamService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Create a team. The creator must be enrolled and joins the team.
    pub async fn create_team(&self, auth: &AuthContext, request: CreateTeamRequest) -> Result<Team> {
        let event_id = request.event_id.get();
        let mut tx = self.db.begin().await?;

        let event = self.db.events.lock_for_update(&mut tx, event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })?;

        let enrollment = self.db.enrollments.find_for_update(&mut tx, event.id, auth.user_id).await?
            .filter(|e| e.status == EnrollmentStatus::Enrolled)
            .ok_or(CodeArenaError::EnrollmentNotFound { event_id })?;

        if self.db.teams.name_exists(&mut tx, event.id, &request.name).await? {
            return Err(CodeArenaError::TeamNameTaken { name: request.name });
        }

        let team = self.db.teams.create(&mut tx, event.id, &request.name, auth.user_id).await?;
        self.db.enrollments.set_team(&mut tx, enrollment.id, team.id).await?;

        tx.commit().await?;

        logging::log_team_action(event.id, team.id, "create", auth.user_id);
        Ok(team)
    }

    /// Teams of an event with member counts
    pub async fn list_teams(&self, event_id: EventId) -> Result<Vec<TeamSummary>> {
        let event_id = event_id.get();
        self.db.events.find_by_id(event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })?;

        self.db.teams.list_for_event(event_id).await
    }

    /// Team statistics of an event. Organizers and admins only.
    pub async fn team_stats(&self, auth: &AuthContext, event_id: EventId) -> Result<TeamStats> {
        auth.require_stats_viewer("view team statistics")?;

        let event_id = event_id.get();
        let event = self.db.events.find_by_id(event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })?;

        let teams = self.db.teams.list_for_event(event.id).await?;
        Ok(TeamStats::from_teams(event.id, &teams, event.max_team_size))
    }
}
