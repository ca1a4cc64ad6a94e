//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;
pub mod event;
pub mod enrollment;
pub mod team;

// Re-export commonly used models
pub use user::{User, CreateUserRequest};
pub use event::{Event, CreateEventRequest};
pub use enrollment::{Enrollment, EnrollmentDetails, EnrollmentStatus, EnrollmentStats, EnrollmentCounts, CancellationOutcome, Page};
pub use team::{Team, TeamSummary, TeamStats};
