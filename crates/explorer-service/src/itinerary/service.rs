//! Itinerary CRUD and event membership.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use explorer_core::error::AppError;
use explorer_database::repositories::{AppendOutcome, ItineraryRepository};
use explorer_entity::event::Event;
use explorer_entity::itinerary::{
    CreateItinerary, DEFAULT_ITINERARY_NAME, Itinerary, UpdateItinerary,
};

use super::validation::{validate_event, validate_event_list};
use crate::context::RequestContext;

const NOT_FOUND: &str = "Itinerary not found";

/// Fields accepted when creating an itinerary. Everything is optional.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct NewItinerary {
    /// Display name; blank or absent becomes "My Itinerary".
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Initial events.
    pub events: Option<Vec<Event>>,
    /// Visibility flag.
    pub is_public: Option<bool>,
}

/// Owner-scoped itinerary operations.
#[derive(Clone)]
pub struct ItineraryService {
    repo: Arc<dyn ItineraryRepository>,
}

impl std::fmt::Debug for ItineraryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryService").finish_non_exhaustive()
    }
}

impl ItineraryService {
    /// Creates a new itinerary service.
    pub fn new(repo: Arc<dyn ItineraryRepository>) -> Self {
        Self { repo }
    }

    /// Lists the caller's itineraries, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Itinerary>, AppError> {
        self.repo.list_by_user(ctx.user_id).await
    }

    /// Number of itineraries the caller owns.
    pub async fn count(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.repo.count_for_user(ctx.user_id).await
    }

    /// Gets one of the caller's itineraries.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Itinerary, AppError> {
        self.repo
            .find_for_user(ctx.user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))
    }

    /// Creates an itinerary, defaulting the name and event list.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: NewItinerary,
    ) -> Result<Itinerary, AppError> {
        let events = req.events.unwrap_or_default();
        validate_event_list(&events)?;

        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_ITINERARY_NAME.to_string());

        let itinerary = self
            .repo
            .create(&CreateItinerary {
                user_id: ctx.user_id,
                name,
                description: req.description,
                events,
                is_public: req.is_public.unwrap_or(false),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            itinerary_id = %itinerary.id,
            events = itinerary.events.len(),
            "Itinerary created"
        );
        Ok(itinerary)
    }

    /// Applies a partial update. Only supplied fields change.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        mut update: UpdateItinerary,
    ) -> Result<Itinerary, AppError> {
        if let Some(ref name) = update.name {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(AppError::validation("Itinerary name must not be blank"));
            }
            update.name = Some(trimmed.to_string());
        }
        if let Some(ref events) = update.events {
            validate_event_list(events)?;
        }

        let itinerary = self
            .repo
            .update(ctx.user_id, id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        info!(user_id = %ctx.user_id, itinerary_id = %id, "Itinerary updated");
        Ok(itinerary)
    }

    /// Deletes one of the caller's itineraries.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(ctx.user_id, id).await? {
            return Err(AppError::not_found(NOT_FOUND));
        }
        info!(user_id = %ctx.user_id, itinerary_id = %id, "Itinerary deleted");
        Ok(())
    }

    /// Appends an event. A repeated event id is a conflict, not a no-op.
    pub async fn add_event(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        event: Event,
    ) -> Result<Itinerary, AppError> {
        validate_event(&event)?;

        match self.repo.append_event(ctx.user_id, id, &event).await? {
            AppendOutcome::Appended(itinerary) => {
                info!(
                    user_id = %ctx.user_id,
                    itinerary_id = %id,
                    event_id = %event.id,
                    "Event added to itinerary"
                );
                Ok(itinerary)
            }
            AppendOutcome::Duplicate => {
                debug!(itinerary_id = %id, event_id = %event.id, "Duplicate event rejected");
                Err(AppError::conflict("Event already in itinerary"))
            }
            AppendOutcome::NotFound => Err(AppError::not_found(NOT_FOUND)),
        }
    }

    /// Removes an event by id. An absent event id returns the itinerary unchanged.
    pub async fn remove_event(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        event_id: &str,
    ) -> Result<Itinerary, AppError> {
        let itinerary = self
            .repo
            .remove_event(ctx.user_id, id, event_id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        info!(
            user_id = %ctx.user_id,
            itinerary_id = %id,
            event_id = %event_id,
            "Event removed from itinerary"
        );
        Ok(itinerary)
    }
}

#[cfg(test)]
mod tests {
    use explorer_core::error::ErrorKind;
    use explorer_database::memory::MemoryItineraryRepository;

    use super::*;

    fn service() -> ItineraryService {
        ItineraryService::new(Arc::new(MemoryItineraryRepository::new()))
    }

    fn ctx() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), None)
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let svc = service();
        let itinerary = svc.create(&ctx(), NewItinerary::default()).await.unwrap();
        assert_eq!(itinerary.name, "My Itinerary");
        assert!(itinerary.events.is_empty());
        assert!(!itinerary.is_public);

        let blank = svc
            .create(
                &ctx(),
                NewItinerary {
                    name: Some("   ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(blank.name, "My Itinerary");
    }

    #[tokio::test]
    async fn test_duplicate_add_is_conflict_and_leaves_itinerary_unchanged() {
        let svc = service();
        let ctx = ctx();
        let trip = svc
            .create(
                &ctx,
                NewItinerary {
                    name: Some("Peru Trip".to_string()),
                    events: Some(Vec::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        svc.add_event(&ctx, trip.id, Event::new("E1", "Inti Raymi"))
            .await
            .unwrap();
        let err = svc
            .add_event(&ctx, trip.id, Event::new("E1", "Inti Raymi again"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let stored = svc.get(&ctx, trip.id).await.unwrap();
        assert_eq!(stored.events.len(), 1);
        assert_eq!(stored.events[0].name, "Inti Raymi");
    }

    #[tokio::test]
    async fn test_cross_user_access_is_not_found() {
        let svc = service();
        let owner = ctx();
        let intruder = ctx();
        let trip = svc.create(&owner, NewItinerary::default()).await.unwrap();

        let get = svc.get(&intruder, trip.id).await.unwrap_err();
        let missing = svc.get(&owner, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(get.kind, ErrorKind::NotFound);
        assert_eq!(get.message, missing.message);

        let update = svc
            .update(
                &intruder,
                trip.id,
                UpdateItinerary {
                    name: Some("mine now".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(update.kind, ErrorKind::NotFound);
        assert_eq!(
            svc.delete(&intruder, trip.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            svc.remove_event(&intruder, trip.id, "E1")
                .await
                .unwrap_err()
                .kind,
            ErrorKind::NotFound
        );
        assert_eq!(svc.get(&owner, trip.id).await.unwrap().name, "My Itinerary");
    }

    #[tokio::test]
    async fn test_update_is_partial_and_refreshes_timestamp() {
        let svc = service();
        let ctx = ctx();
        let trip = svc
            .create(
                &ctx,
                NewItinerary {
                    name: Some("Lima".to_string()),
                    description: Some("food".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = svc
            .update(
                &ctx,
                trip.id,
                UpdateItinerary {
                    is_public: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Lima");
        assert_eq!(updated.description.as_deref(), Some("food"));
        assert!(updated.is_public);
        assert!(updated.updated_at >= trip.updated_at);

        let cleared = svc
            .update(
                &ctx,
                trip.id,
                UpdateItinerary {
                    description: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.description, None);
        assert!(cleared.is_public);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name_and_duplicate_events() {
        let svc = service();
        let ctx = ctx();
        let trip = svc.create(&ctx, NewItinerary::default()).await.unwrap();

        let blank = svc
            .update(
                &ctx,
                trip.id,
                UpdateItinerary {
                    name: Some(" ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(blank.kind, ErrorKind::Validation);

        let dupes = svc
            .update(
                &ctx,
                trip.id,
                UpdateItinerary {
                    events: Some(vec![Event::new("E1", "a"), Event::new("E1", "b")]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(dupes.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_remove_absent_event_is_a_no_op() {
        let svc = service();
        let ctx = ctx();
        let trip = svc
            .create(
                &ctx,
                NewItinerary {
                    events: Some(vec![Event::new("E1", "a"), Event::new("E2", "b")]),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let same = svc.remove_event(&ctx, trip.id, "E9").await.unwrap();
        assert_eq!(same.events.len(), 2);

        let after = svc.remove_event(&ctx, trip.id, "E1").await.unwrap();
        let ids: Vec<&str> = after.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E2"]);
    }

    #[tokio::test]
    async fn test_invalid_event_is_rejected_before_storage() {
        let svc = service();
        let ctx = ctx();
        let trip = svc.create(&ctx, NewItinerary::default()).await.unwrap();

        let err = svc
            .add_event(&ctx, trip.id, Event::new("", "no id"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(svc.get(&ctx, trip.id).await.unwrap().events.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_terminal() {
        let svc = service();
        let ctx = ctx();
        let trip = svc.create(&ctx, NewItinerary::default()).await.unwrap();

        svc.delete(&ctx, trip.id).await.unwrap();
        assert_eq!(
            svc.get(&ctx, trip.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
        assert_eq!(
            svc.delete(&ctx, trip.id).await.unwrap_err().kind,
            ErrorKind::NotFound
        );
    }
}
