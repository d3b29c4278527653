//! Moves a legacy client-local itinerary into the itinerary store.
//!
//! The only guard against migrating twice is the user's itinerary count:
//! once any itinerary exists, migration never runs again.

use serde_json::Value;
use tracing::{info, warn};

use explorer_core::error::AppError;
use explorer_entity::itinerary::{DEFAULT_ITINERARY_NAME, Itinerary};
use explorer_entity::legacy::{LegacyPayload, RejectedRecord};

use super::store::LegacyPayloadStore;
use crate::context::RequestContext;
use crate::itinerary::{ItineraryService, NewItinerary};

/// Why a migration did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// No legacy payload was present.
    NoLegacyPayload,
    /// The user already owns at least one itinerary.
    HasItineraries,
    /// The payload held no usable event.
    NoUsableEvents,
}

/// What a migration attempt did.
#[derive(Debug, Clone)]
pub enum MigrationOutcome {
    /// A new itinerary was created from the payload.
    Migrated {
        /// The created itinerary.
        itinerary: Itinerary,
        /// Records that were dropped during conversion.
        rejected: Vec<RejectedRecord>,
    },
    /// Nothing was written.
    Skipped(SkipReason),
}

impl MigrationOutcome {
    /// Whether an itinerary was created.
    pub fn is_migrated(&self) -> bool {
        matches!(self, Self::Migrated { .. })
    }
}

/// Runs the client migration.
#[derive(Debug, Clone)]
pub struct MigrationService {
    itineraries: ItineraryService,
}

impl MigrationService {
    /// Creates a new migration service.
    pub fn new(itineraries: ItineraryService) -> Self {
        Self { itineraries }
    }

    /// Migrates `raw` if the caller owns no itinerary yet.
    ///
    /// The caller must drop its copy of the payload only when the outcome
    /// is [`MigrationOutcome::Migrated`].
    pub async fn migrate(
        &self,
        ctx: &RequestContext,
        raw: &Value,
    ) -> Result<MigrationOutcome, AppError> {
        if self.itineraries.count(ctx).await? > 0 {
            return Ok(MigrationOutcome::Skipped(SkipReason::HasItineraries));
        }

        let payload = LegacyPayload::parse(raw)?;
        for rejected in &payload.rejected {
            warn!(
                user_id = %ctx.user_id,
                index = rejected.index,
                reason = %rejected.reason,
                "Dropped legacy event record"
            );
        }
        if payload.is_empty() {
            return Ok(MigrationOutcome::Skipped(SkipReason::NoUsableEvents));
        }

        let rejected = payload.rejected.clone();
        let itinerary = self
            .itineraries
            .create(
                ctx,
                NewItinerary {
                    name: Some(DEFAULT_ITINERARY_NAME.to_string()),
                    events: Some(payload.into_events()),
                    ..Default::default()
                },
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            itinerary_id = %itinerary.id,
            events = itinerary.events.len(),
            "Legacy itinerary migrated"
        );
        Ok(MigrationOutcome::Migrated {
            itinerary,
            rejected,
        })
    }

    /// Session bootstrap: migrate whatever `store` holds for the caller.
    ///
    /// The payload is cleared only after the itinerary was created; any
    /// error leaves it in place for a later attempt.
    pub async fn bootstrap(
        &self,
        ctx: &RequestContext,
        store: &dyn LegacyPayloadStore,
    ) -> Result<MigrationOutcome, AppError> {
        let Some(raw) = store.load(ctx.user_id).await? else {
            return Ok(MigrationOutcome::Skipped(SkipReason::NoLegacyPayload));
        };

        let outcome = self.migrate(ctx, &raw).await?;
        if outcome.is_migrated() {
            store.clear(ctx.user_id).await?;
        }
        Ok(outcome)
    }
}
