//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod enrollment;
pub mod event;
pub mod rules;
pub mod team;

// Re-export commonly used services
pub use auth::{AuthService, AuthContext, Role, Claims};
pub use enrollment::EnrollmentService;
pub use event::{EventService, EventRules};
pub use rules::{RuleIcon, RuleItem, parse_rules};
pub use team::TeamService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub enrollment_service: EnrollmentService,
    pub event_service: EventService,
    pub team_service: TeamService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: &Settings, database: DatabaseService) -> Self {
        Self {
            auth_service: AuthService::new(&settings.auth),
            enrollment_service: EnrollmentService::new(database.clone(), settings.enrollment.clone()),
            event_service: EventService::new(database.clone()),
            team_service: TeamService::new(database.clone()),
            database,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = crate::database::health_check(self.database.pool()).await.is_ok();

        ServiceHealthStatus {
            database_healthy,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }

        issues
    }
}
