//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::PostRepository;
use blog_infra::database::{self, Driver, InMemoryPostRepository, SqlPostRepository};

use crate::config::AppConfig;
use crate::telemetry::LogLevelController;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub log_level: LogLevelController,
    pub api_key: Option<String>,
}

impl AppState {
    /// Build the state from an already constructed repository.
    pub fn with_repository(
        repo: Arc<dyn PostRepository>,
        api_key: Option<String>,
        log_level: LogLevelController,
    ) -> Self {
        Self {
            posts: PostService::new(repo),
            log_level,
            api_key: api_key.filter(|key| !key.is_empty()),
        }
    }

    /// Build the application state, connecting to and migrating the
    /// configured database unless the in-memory store is selected.
    pub async fn new(config: &AppConfig, log_level: LogLevelController) -> anyhow::Result<Self> {
        let repo: Arc<dyn PostRepository> = match config.database.driver()? {
            Driver::Memory => {
                tracing::warn!("Using in-memory post storage, data is lost on exit");
                Arc::new(InMemoryPostRepository::new())
            }
            driver => {
                let conn = database::connect(&config.database).await?;
                database::migrate::migrate_up(&conn).await?;
                tracing::info!(driver = ?driver, "Migrations applied");
                Arc::new(SqlPostRepository::new(conn, &config.database.driver))
            }
        };

        if config.api_key.is_none() {
            tracing::warn!("API_KEY not set, mutating routes are unprotected");
        }

        tracing::info!("Application state initialized");

        Ok(Self::with_repository(
            repo,
            config.api_key.clone(),
            log_level,
        ))
    }
}
