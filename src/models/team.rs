//! Team model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

/// Team with its current number of enrolled members
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TeamSummary {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub member_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Aggregated team counters for the organizer dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub event_id: i64,
    pub total_teams: i64,
    pub full_teams: i64,
    pub members_in_teams: i64,
    pub average_team_size: f64,
    pub max_team_size: i32,
}

impl TeamStats {
    pub fn from_teams(event_id: i64, teams: &[TeamSummary], max_team_size: i32) -> Self {
        let total_teams = teams.len() as i64;
        let members_in_teams: i64 = teams.iter().map(|t| t.member_count).sum();
        let full_teams = teams
            .iter()
            .filter(|t| t.member_count >= max_team_size as i64)
            .count() as i64;
        let average_team_size = if total_teams == 0 {
            0.0
        } else {
            members_in_teams as f64 / total_teams as f64
        };

        Self {
            event_id,
            total_teams,
            full_teams,
            members_in_teams,
            average_team_size,
            max_team_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, member_count: i64) -> TeamSummary {
        TeamSummary {
            id,
            event_id: 1,
            name: format!("team-{}", id),
            member_count,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_from_teams() {
        let teams = vec![summary(1, 4), summary(2, 2), summary(3, 0)];
        let stats = TeamStats::from_teams(1, &teams, 4);
        assert_eq!(stats.total_teams, 3);
        assert_eq!(stats.full_teams, 1);
        assert_eq!(stats.members_in_teams, 6);
        assert!((stats.average_team_size - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_without_teams() {
        let stats = TeamStats::from_teams(9, &[], 5);
        assert_eq!(stats.total_teams, 0);
        assert_eq!(stats.average_team_size, 0.0);
    }
}
