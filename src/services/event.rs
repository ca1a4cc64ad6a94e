//! Event service implementation

use serde::Serialize;
use crate::database::DatabaseService;
use crate::models::enrollment::Page;
use crate::models::event::Event;
use crate::services::rules::{parse_rules, RuleItem};
use crate::utils::errors::{CodeArenaError, Result};
use crate::utils::helpers::calculate_offset;
use crate::validation::EventId;

/// Rules of an event, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct EventRules {
    pub event_id: i64,
    pub rules: Vec<RuleItem>,
}

#[derive(Clone)]
pub struct EventService {
    db: DatabaseService,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    /// Active events, soonest first
    pub async fn list_events(&self, page: u32, limit: u32) -> Result<Page<Event>> {
        let total = self.db.events.count_active().await?;
        let events = self.db.events
            .list_active(limit as i64, calculate_offset(page, limit))
            .await?;

        Ok(Page::new(events, page, limit, total))
    }

    pub async fn get_event(&self, event_id: EventId) -> Result<Event> {
        let event_id = event_id.get();
        self.db.events.find_by_id(event_id).await?
            .ok_or(CodeArenaError::EventNotFound { event_id })
    }

    /// Event rules split into display items with icons
    pub async fn get_rules(&self, event_id: EventId) -> Result<EventRules> {
        let event = self.get_event(event_id).await?;

        Ok(EventRules {
            event_id: event.id,
            rules: parse_rules(event.rules.as_deref()),
        })
    }
}
