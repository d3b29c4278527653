//! In-memory itinerary repository.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use explorer_core::result::AppResult;
use explorer_entity::event::Event;
use explorer_entity::itinerary::{CreateItinerary, Itinerary, UpdateItinerary};

use super::{Stored, newest_first};
use crate::repositories::{AppendOutcome, ItineraryRepository};

/// Itineraries held in a concurrent map keyed by id.
#[derive(Debug, Default)]
pub struct MemoryItineraryRepository {
    itineraries: DashMap<Uuid, Stored<Itinerary>>,
    seq: AtomicU64,
}

impl MemoryItineraryRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItineraryRepository for MemoryItineraryRepository {
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Itinerary>> {
        let owned = self
            .itineraries
            .iter()
            .filter(|entry| entry.doc.user_id == user_id)
            .map(|entry| (entry.doc.created_at, entry.value().clone()))
            .collect();
        Ok(newest_first(owned))
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<Itinerary>> {
        Ok(self
            .itineraries
            .get(&id)
            .filter(|entry| entry.doc.user_id == user_id)
            .map(|entry| entry.doc.clone()))
    }

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        Ok(self
            .itineraries
            .iter()
            .filter(|entry| entry.doc.user_id == user_id)
            .count() as u64)
    }

    async fn create(&self, data: &CreateItinerary) -> AppResult<Itinerary> {
        let now = Utc::now();
        let itinerary = Itinerary {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            name: data.name.clone(),
            description: data.description.clone(),
            events: data.events.clone(),
            is_public: data.is_public,
            created_at: now,
            updated_at: now,
        };
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        self.itineraries.insert(
            itinerary.id,
            Stored {
                seq,
                doc: itinerary.clone(),
            },
        );
        Ok(itinerary)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &UpdateItinerary,
    ) -> AppResult<Option<Itinerary>> {
        let Some(mut entry) = self.itineraries.get_mut(&id) else {
            return Ok(None);
        };
        if entry.doc.user_id != user_id {
            return Ok(None);
        }
        update.apply_to(&mut entry.doc, Utc::now());
        Ok(Some(entry.doc.clone()))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        Ok(self
            .itineraries
            .remove_if(&id, |_, stored| stored.doc.user_id == user_id)
            .is_some())
    }

    async fn append_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        event: &Event,
    ) -> AppResult<AppendOutcome> {
        let Some(mut entry) = self.itineraries.get_mut(&id) else {
            return Ok(AppendOutcome::NotFound);
        };
        if entry.doc.user_id != user_id {
            return Ok(AppendOutcome::NotFound);
        }
        if entry.doc.contains_event(&event.id) {
            return Ok(AppendOutcome::Duplicate);
        }
        entry.doc.events.push(event.clone());
        entry.doc.updated_at = Utc::now();
        Ok(AppendOutcome::Appended(entry.doc.clone()))
    }

    async fn remove_event(
        &self,
        user_id: Uuid,
        id: Uuid,
        event_id: &str,
    ) -> AppResult<Option<Itinerary>> {
        let Some(mut entry) = self.itineraries.get_mut(&id) else {
            return Ok(None);
        };
        if entry.doc.user_id != user_id {
            return Ok(None);
        }
        if entry.doc.contains_event(event_id) {
            entry.doc.events.retain(|e| e.id != event_id);
            entry.doc.updated_at = Utc::now();
        }
        Ok(Some(entry.doc.clone()))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
