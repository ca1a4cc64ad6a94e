//! Database repositories module
//! 
//! This module contains all repository implementations for data access

pub mod user;
pub mod event;
pub mod enrollment;
pub mod team;

// Re-export repositories
pub use user::UserRepository;
pub use event::EventRepository;
pub use enrollment::EnrollmentRepository;
pub use team::TeamRepository;
