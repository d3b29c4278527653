//! Repository bundle selected by configuration.

use std::sync::Arc;

use tracing::info;

use explorer_core::config::{DatabaseConfig, StoreBackend};
use explorer_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryItineraryRepository, MemorySharedLinkRepository};
use crate::migration::run_migrations;
use crate::repositories::{
    ItineraryRepository, PgItineraryRepository, PgSharedLinkRepository, SharedLinkRepository,
};

/// The repositories the service layer works against.
#[derive(Clone)]
pub struct Repositories {
    /// Itinerary storage.
    pub itineraries: Arc<dyn ItineraryRepository>,
    /// Shared link storage.
    pub shared_links: Arc<dyn SharedLinkRepository>,
}

impl Repositories {
    /// Process-local repositories. Nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            itineraries: Arc::new(MemoryItineraryRepository::new()),
            shared_links: Arc::new(MemorySharedLinkRepository::new()),
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: &DatabasePool) -> Self {
        Self {
            itineraries: Arc::new(PgItineraryRepository::new(pool.handle())),
            shared_links: Arc::new(PgSharedLinkRepository::new(pool.handle())),
        }
    }

    /// Build the configured backend, connecting and migrating if needed.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            StoreBackend::Memory => {
                info!("Using in-memory store");
                Ok(Self::in_memory())
            }
            StoreBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(&pool))
            }
        }
    }

    /// Both stores answer.
    pub async fn health_check(&self) -> AppResult<bool> {
        Ok(self.itineraries.health_check().await? && self.shared_links.health_check().await?)
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}
