//! Application state - shared across all handlers.

use std::sync::Arc;

use vigia_core::ports::{CredentialValidator, PostRepository};
use vigia_core::services::{ModerationService, QueryService, SubmissionService};
use vigia_infra::{InMemoryPostRepository, SharedSecretValidator};

#[cfg(feature = "postgres")]
use migration::{Migrator, MigratorTrait};
#[cfg(feature = "postgres")]
use vigia_infra::{DatabaseConnections, PostgresPostRepository};

use crate::config::AppConfig;
use crate::middleware::origin::OriginPolicy;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub submissions: SubmissionService,
    pub moderation: ModerationService,
    pub queries: QueryService,
    pub posts: Arc<dyn PostRepository>,
    pub credentials: Arc<dyn CredentialValidator>,
    pub origin_policy: OriginPolicy,
    /// Store backend name reported by the health check.
    pub store_backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let (posts, backend) = open_store(config).await?;

        let credentials = Arc::new(SharedSecretValidator::new(
            config.moderation.api_key.clone(),
        ));
        let origin_policy = OriginPolicy::new(
            config.environment.is_production(),
            &config.moderation.trusted_origins,
        );

        tracing::info!(
            store = backend,
            origin_policy_enforced = origin_policy.is_enforced(),
            "Application state initialized"
        );

        Ok(Self::with_repository(
            posts,
            credentials,
            origin_policy,
            backend,
        ))
    }

    /// Wire the services around an already-built store.
    pub fn with_repository(
        posts: Arc<dyn PostRepository>,
        credentials: Arc<dyn CredentialValidator>,
        origin_policy: OriginPolicy,
        store_backend: &'static str,
    ) -> Self {
        Self {
            submissions: SubmissionService::new(posts.clone()),
            moderation: ModerationService::new(posts.clone()),
            queries: QueryService::new(posts.clone()),
            posts,
            credentials,
            origin_policy,
            store_backend,
        }
    }
}

fn in_memory() -> (Arc<dyn PostRepository>, &'static str) {
    (Arc::new(InMemoryPostRepository::new()), "memory")
}

#[cfg(feature = "postgres")]
async fn open_store(config: &AppConfig) -> anyhow::Result<(Arc<dyn PostRepository>, &'static str)> {
    let Some(db_config) = &config.database else {
        if config.environment.is_production() {
            anyhow::bail!("DATABASE_URL must be set when running in production");
        }
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return Ok(in_memory());
    };

    let connections = match DatabaseConnections::init(db_config).await {
        Ok(connections) => connections,
        Err(e) if config.environment.is_production() => {
            return Err(anyhow::Error::new(e).context("failed to connect to database"));
        }
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            return Ok(in_memory());
        }
    };

    if db_config.run_migrations {
        tracing::info!("Applying pending migrations");
        Migrator::up(&connections.main, None).await?;
    }

    Ok((
        Arc::new(PostgresPostRepository::new(connections.main)),
        "postgres",
    ))
}

#[cfg(not(feature = "postgres"))]
async fn open_store(config: &AppConfig) -> anyhow::Result<(Arc<dyn PostRepository>, &'static str)> {
    if config.database.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
    }
    tracing::info!("Running without postgres feature - using in-memory repository");
    Ok(in_memory())
}
