//! Shared application state
//!
//! One `AppState` is built at startup and cloned into every request handler.

use std::sync::Arc;
use crate::config::Settings;
use crate::database::{DatabasePool, DatabaseService};
use crate::services::ServiceFactory;

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceFactory>,
}

impl AppState {
    pub fn new(settings: &Settings, pool: DatabasePool) -> Self {
        let database = DatabaseService::new(pool);

        Self {
            services: Arc::new(ServiceFactory::new(settings, database)),
        }
    }
}
