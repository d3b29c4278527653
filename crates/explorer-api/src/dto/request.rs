//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use explorer_entity::event::Event;
use explorer_entity::itinerary::UpdateItinerary;
use explorer_service::itinerary::NewItinerary;
use explorer_service::share::EventShareRequest;

/// Create itinerary request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItineraryRequest {
    /// Display name.
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: Option<String>,
    /// Description.
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    /// Initial events.
    #[validate(length(max = 500, message = "Too many events"))]
    pub events: Option<Vec<Event>>,
    /// Visibility flag.
    pub is_public: Option<bool>,
}

impl From<CreateItineraryRequest> for NewItinerary {
    fn from(req: CreateItineraryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            events: req.events,
            is_public: req.is_public,
        }
    }
}

/// Update itinerary request; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItineraryRequest {
    /// New name.
    #[validate(length(min = 1, max = 200, message = "Name must be 1 to 200 characters"))]
    pub name: Option<String>,
    /// New description.
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    /// Replacement event list.
    #[validate(length(max = 500, message = "Too many events"))]
    pub events: Option<Vec<Event>>,
    /// New visibility flag.
    pub is_public: Option<bool>,
}

impl From<UpdateItineraryRequest> for UpdateItinerary {
    fn from(req: UpdateItineraryRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            events: req.events,
            is_public: req.is_public,
        }
    }
}

/// Share a single event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventShareRequest {
    /// Event id.
    #[validate(length(max = 256))]
    pub event_id: Option<String>,
    /// Event name.
    #[validate(length(max = 500))]
    pub event_name: Option<String>,
    /// Event page.
    #[validate(length(max = 2048))]
    pub event_url: Option<String>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<CreateEventShareRequest> for EventShareRequest {
    fn from(req: CreateEventShareRequest) -> Self {
        Self {
            event_id: req.event_id,
            event_name: req.event_name,
            event_url: req.event_url,
            expires_at: req.expires_at,
        }
    }
}

/// Share a frozen list of events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItineraryShareRequest {
    /// Events to copy into the link.
    #[validate(length(max = 500, message = "Too many events"))]
    pub events: Option<Vec<Event>>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Ad hoc calendar export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CalendarExportRequest {
    /// Events to export.
    #[validate(length(max = 500, message = "Too many events"))]
    pub events: Option<Vec<Event>>,
}
