//! Shared link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use explorer_core::result::AppResult;
use explorer_entity::share::{CreateSharedLink, SharedLink};

use super::db_error;

/// Storage operations on shared links.
#[async_trait]
pub trait SharedLinkRepository: Send + Sync {
    /// Persist a new link. A token that already exists is a conflict.
    async fn create(&self, data: &CreateSharedLink) -> AppResult<SharedLink>;

    /// Look a link up by token regardless of its state.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<SharedLink>>;

    /// All links a user minted, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<SharedLink>>;

    /// Count one access if the link is live at `now`.
    ///
    /// Returns the updated link, or `None` when the token is unknown,
    /// revoked, or expired. The check and the increment happen in one step.
    async fn record_access(&self, token: &str, now: DateTime<Utc>)
    -> AppResult<Option<SharedLink>>;

    /// Mark a link revoked. Revoking twice is a no-op that still returns the link.
    async fn revoke(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<SharedLink>>;

    /// Whether the backing store answers.
    async fn health_check(&self) -> AppResult<bool>;
}

/// PostgreSQL-backed shared link repository.
#[derive(Debug, Clone)]
pub struct PgSharedLinkRepository {
    pool: PgPool,
}

impl PgSharedLinkRepository {
    /// Create a new shared link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SharedLinkRepository for PgSharedLinkRepository {
    async fn create(&self, data: &CreateSharedLink) -> AppResult<SharedLink> {
        let now = Utc::now();
        sqlx::query_as::<_, SharedLink>(
            r#"INSERT INTO shared_links
               (id, user_id, link_type, token, event_id, event_name, event_url,
                itinerary_data, is_revoked, access_count, expires_at, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, 0, $9, $10, $10)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(data.link_type)
        .bind(&data.token)
        .bind(&data.event_id)
        .bind(&data.event_name)
        .bind(&data.event_url)
        .bind(Json(&data.itinerary_data))
        .bind(data.expires_at)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create shared link", e))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<SharedLink>> {
        sqlx::query_as::<_, SharedLink>("SELECT * FROM shared_links WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find shared link by token", e))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<SharedLink>> {
        sqlx::query_as::<_, SharedLink>(
            "SELECT * FROM shared_links WHERE user_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list shared links", e))
    }

    async fn record_access(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Option<SharedLink>> {
        sqlx::query_as::<_, SharedLink>(
            r#"UPDATE shared_links SET
                 access_count = access_count + 1,
                 updated_at = $2
               WHERE token = $1
                 AND is_revoked = FALSE
                 AND (expires_at IS NULL OR expires_at > $2)
               RETURNING *"#,
        )
        .bind(token)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to record shared link access", e))
    }

    async fn revoke(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<SharedLink>> {
        sqlx::query_as::<_, SharedLink>(
            r#"UPDATE shared_links SET
                 is_revoked = TRUE,
                 updated_at = CASE WHEN is_revoked THEN updated_at ELSE NOW() END
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to revoke shared link", e))
    }

    async fn health_check(&self) -> AppResult<bool> {
        crate::connection::ping(&self.pool).await
    }
}
