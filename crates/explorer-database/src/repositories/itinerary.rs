//! Itinerary repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use explorer_core::result::AppResult;
use explorer_entity::event::Event;
use explorer_entity::itinerary::{CreateItinerary, Itinerary, UpdateItinerary};

use super::db_error;

/// Result of appending an event to an itinerary.
#[derive(Debug, Clone)]
pub enum AppendOutcome {
    /// The event was appended; carries the updated itinerary.
    Appended(Itinerary),
    /// An event with the same id is already present. Nothing changed.
    Duplicate,
    /// No itinerary with that id belongs to the user.
    NotFound,
}

/// Storage operations on itineraries.
///
/// Every lookup and mutation is keyed by `(user_id, id)`; an itinerary
/// owned by another user is indistinguishable from a missing one.
#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    /// All itineraries of a user, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Itinerary>>;

    /// One itinerary of a user.
    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Itinerary>>;

    /// Number of itineraries a user owns.
    async fn count_for_user(&self, user_id: Uuid) -> AppResult<u64>;

    /// Persist a new itinerary.
    async fn create(&self, data: &CreateItinerary) -> AppResult<Itinerary>;

    /// Apply a partial update in one step.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &UpdateItinerary,
    ) -> AppResult<Option<Itinerary>>;

    /// Delete an itinerary. Returns whether a row was removed.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Append `event` unless an event with the same id is present.
    async fn append_event(&self, user_id: Uuid, id: Uuid, event: &Event)
    -> AppResult<AppendOutcome>;

    /// Remove every event with `event_id`. A missing event leaves the
    /// itinerary untouched and returns it as is.
    async fn remove_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        event_id: &str,
    ) -> AppResult<Option<Itinerary>>;

    /// Whether the backing store answers.
    async fn health_check(&self) -> AppResult<bool>;
}

/// PostgreSQL-backed itinerary repository. Events live in a JSONB array.
#[derive(Debug, Clone)]
pub struct PgItineraryRepository {
    pool: PgPool,
}

impl PgItineraryRepository {
    /// Create a new itinerary repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM itineraries WHERE id = $1 AND user_id = $2)",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check itinerary", e))
    }
}

#[async_trait]
impl ItineraryRepository for PgItineraryRepository {
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Itinerary>> {
        sqlx::query_as::<_, Itinerary>(
            "SELECT * FROM itineraries WHERE user_id = $1 ORDER BY created_at DESC, id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list itineraries", e))
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Itinerary>> {
        sqlx::query_as::<_, Itinerary>("SELECT * FROM itineraries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find itinerary", e))
    }

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM itineraries WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count itineraries", e))?;
        Ok(count.max(0) as u64)
    }

    async fn create(&self, data: &CreateItinerary) -> AppResult<Itinerary> {
        let now = Utc::now();
        sqlx::query_as::<_, Itinerary>(
            r#"INSERT INTO itineraries
               (id, user_id, name, description, events, is_public, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
               RETURNING *"#,
        )
        .bind(Uuid::new_v4())
        .bind(data.user_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(Json(&data.events))
        .bind(data.is_public)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create itinerary", e))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &UpdateItinerary,
    ) -> AppResult<Option<Itinerary>> {
        sqlx::query_as::<_, Itinerary>(
            r#"UPDATE itineraries SET
                 name = COALESCE($3, name),
                 description = CASE
                   WHEN $4::text IS NULL THEN description
                   WHEN btrim($4::text) = '' THEN NULL
                   ELSE $4::text
                 END,
                 events = COALESCE($5, events),
                 is_public = COALESCE($6, is_public),
                 updated_at = NOW()
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.events.as_ref().map(Json))
        .bind(update.is_public)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update itinerary", e))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM itineraries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete itinerary", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn append_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        event: &Event,
    ) -> AppResult<AppendOutcome> {
        // The membership test sits in the WHERE clause so that a concurrent
        // append of the same id re-evaluates it after the row lock is released.
        let appended = sqlx::query_as::<_, Itinerary>(
            r#"UPDATE itineraries SET
                 events = events || jsonb_build_array($3::jsonb),
                 updated_at = NOW()
               WHERE id = $1 AND user_id = $2
                 AND NOT EXISTS (
                   SELECT 1 FROM jsonb_array_elements(events) AS e
                   WHERE e->>'id' = $4
                 )
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(Json(event))
        .bind(&event.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append event", e))?;

        match appended {
            Some(itinerary) => Ok(AppendOutcome::Appended(itinerary)),
            None if self.exists_for_user(user_id, id).await? => Ok(AppendOutcome::Duplicate),
            None => Ok(AppendOutcome::NotFound),
        }
    }

    async fn remove_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        event_id: &str,
    ) -> AppResult<Option<Itinerary>> {
        let removed = sqlx::query_as::<_, Itinerary>(
            r#"UPDATE itineraries SET
                 events = COALESCE(
                   (SELECT jsonb_agg(e.value ORDER BY e.ordinality)
                      FROM jsonb_array_elements(events) WITH ORDINALITY AS e(value, ordinality)
                     WHERE e.value->>'id' IS DISTINCT FROM $3),
                   '[]'::jsonb),
                 updated_at = NOW()
               WHERE id = $1 AND user_id = $2
                 AND EXISTS (
                   SELECT 1 FROM jsonb_array_elements(events) AS e
                   WHERE e->>'id' = $3
                 )
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to remove event", e))?;

        match removed {
            Some(itinerary) => Ok(Some(itinerary)),
            None => self.find_for_user(user_id, id).await,
        }
    }

    async fn health_check(&self) -> AppResult<bool> {
        crate::connection::ping(&self.pool).await
    }
}
