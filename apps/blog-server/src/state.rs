//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;

use folio_core::domain::Post;
use folio_core::ports::{Clock, PostRepository};
use folio_core::services::PostCatalog;
use folio_infra::database::DatabaseConnections;
use folio_infra::{InMemoryPostRepository, SystemClock};

#[cfg(feature = "postgres")]
use folio_infra::database::PostgresPostRepository;

use crate::config::{AppConfig, AppEnvironment};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: PostCatalog,
    pub clock: Arc<dyn Clock>,
    pub posts_per_page: u64,
    pub environment: AppEnvironment,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let seed = match &config.seed_file {
            Some(path) => folio_infra::load_posts(path, clock.now())
                .await
                .with_context(|| format!("Failed to load POSTS_SEED_FILE {}", path.display()))?,
            None => Vec::new(),
        };

        #[cfg(feature = "postgres")]
        let (db, posts): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) = {
            if let Some(db_config) = &config.database {
                // A configured database must be reachable; there is no in-memory fallback.
                let connections = DatabaseConnections::init(db_config)
                    .await
                    .context("Failed to connect to DATABASE_URL")?;
                let repo = PostgresPostRepository::new(connections.main.clone());
                repo.upsert_many(seed)
                    .await
                    .context("Failed to import seed posts")?;
                let posts: Arc<dyn PostRepository> = Arc::new(repo);
                (Some(Arc::new(connections)), posts)
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, in_memory(seed))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (db, posts): (Option<Arc<DatabaseConnections>>, Arc<dyn PostRepository>) = {
            if config.database.is_some() {
                anyhow::bail!("DATABASE_URL is set but the server was built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory repository");
            (None, in_memory(seed))
        };

        tracing::info!(
            environment = %config.environment,
            posts_per_page = config.posts_per_page,
            "Application state initialized"
        );

        Ok(Self {
            catalog: PostCatalog::new(posts),
            clock,
            posts_per_page: config.posts_per_page,
            environment: config.environment,
            db,
        })
    }

    /// State over an explicit repository and clock, without a database pool.
    pub fn with_repository(
        posts: Arc<dyn PostRepository>,
        clock: Arc<dyn Clock>,
        posts_per_page: u64,
    ) -> Self {
        Self {
            catalog: PostCatalog::new(posts),
            clock,
            posts_per_page,
            environment: AppEnvironment::Testing,
            db: None,
        }
    }
}

fn in_memory(seed: Vec<Post>) -> Arc<dyn PostRepository> {
    Arc::new(InMemoryPostRepository::with_posts(seed))
}
