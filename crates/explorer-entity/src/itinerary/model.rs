//! Itinerary entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::event::Event;

/// Name given to itineraries created without one.
pub const DEFAULT_ITINERARY_NAME: &str = "My Itinerary";

/// A named, user-owned, ordered collection of events.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Unique itinerary identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Events in insertion order. Ids are unique within the list.
    #[sqlx(json)]
    pub events: Vec<Event>,
    /// Visibility flag. Stored and returned; no read path branches on it.
    pub is_public: bool,
    /// When the itinerary was created.
    pub created_at: DateTime<Utc>,
    /// When the itinerary was last mutated.
    pub updated_at: DateTime<Utc>,
}

impl Itinerary {
    /// Returns whether an event with this id is already present.
    pub fn contains_event(&self, event_id: &str) -> bool {
        self.events.iter().any(|e| e.id == event_id)
    }
}

/// Data required to create a new itinerary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItinerary {
    /// Owning user.
    pub user_id: Uuid,
    /// Display name (already defaulted).
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Initial events.
    pub events: Vec<Event>,
    /// Visibility flag.
    pub is_public: bool,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItinerary {
    /// New name.
    pub name: Option<String>,
    /// New description. A blank string clears it.
    pub description: Option<String>,
    /// Replacement event list.
    pub events: Option<Vec<Event>>,
    /// New visibility flag.
    pub is_public: Option<bool>,
}

impl UpdateItinerary {
    /// Applies the supplied fields to `itinerary` and bumps `updated_at`.
    pub fn apply_to(&self, itinerary: &mut Itinerary, now: DateTime<Utc>) {
        if let Some(ref name) = self.name {
            itinerary.name = name.clone();
        }
        if let Some(ref description) = self.description {
            itinerary.description = Some(description.clone()).filter(|d| !d.trim().is_empty());
        }
        if let Some(ref events) = self.events {
            itinerary.events = events.clone();
        }
        if let Some(is_public) = self.is_public {
            itinerary.is_public = is_public;
        }
        itinerary.updated_at = now;
    }
}
