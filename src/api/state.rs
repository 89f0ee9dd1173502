//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::jobs::JobQueue;
use crate::services::Services;

/// Application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Application services
    pub services: Services,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from the shared connections and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        let services =
            Services::from_connection(database.get_connection(), (*cache).clone(), config, queue);

        Self {
            services,
            cache,
            database,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(services: Services, cache: Arc<Cache>, database: Arc<Database>) -> Self {
        Self {
            services,
            cache,
            database,
        }
    }
}
