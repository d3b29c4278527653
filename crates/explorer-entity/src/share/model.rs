//! Shared link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::event::Event;

/// What a shared link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shared_link_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharedLinkType {
    /// A single event, referenced by id, name and url.
    Event,
    /// A frozen copy of a list of events.
    Itinerary,
}

/// Events copied into a link when it was created.
///
/// Later edits to the source itinerary never reach the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItinerarySnapshot {
    /// The copied events, in their original order.
    pub events: Vec<Event>,
}

/// A token-addressable, revocable public view of an event or event list.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SharedLink {
    /// Internal identifier, used only by the owner for management.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Link kind.
    #[serde(rename = "type")]
    pub link_type: SharedLinkType,
    /// Bearer token; the only key anonymous readers can use.
    pub token: String,
    /// Shared event id (event links).
    pub event_id: Option<String>,
    /// Shared event name (event links).
    pub event_name: Option<String>,
    /// Shared event url (event links).
    pub event_url: Option<String>,
    /// Snapshot (itinerary links).
    #[sqlx(json)]
    pub itinerary_data: Option<ItinerarySnapshot>,
    /// Set once by the owner; never cleared.
    pub is_revoked: bool,
    /// Successful anonymous resolutions so far.
    pub access_count: i64,
    /// After this instant the link resolves as gone.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the link was minted.
    pub created_at: DateTime<Utc>,
    /// Last revocation or access.
    pub updated_at: DateTime<Utc>,
}

impl SharedLink {
    /// Whether `expires_at` lies at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}

/// Data required to persist a new shared link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSharedLink {
    /// Owning user.
    pub user_id: Uuid,
    /// Link kind.
    pub link_type: SharedLinkType,
    /// Freshly generated token.
    pub token: String,
    /// Event id (event links).
    pub event_id: Option<String>,
    /// Event name (event links).
    pub event_name: Option<String>,
    /// Event url (event links).
    pub event_url: Option<String>,
    /// Snapshot (itinerary links).
    pub itinerary_data: Option<ItinerarySnapshot>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(expires_at: Option<DateTime<Utc>>) -> SharedLink {
        let now = Utc::now();
        SharedLink {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            link_type: SharedLinkType::Itinerary,
            token: "ab12".to_string(),
            event_id: None,
            event_name: None,
            event_url: None,
            itinerary_data: Some(ItinerarySnapshot {
                events: vec![Event::new("E1", "Inti Raymi")],
            }),
            is_revoked: false,
            access_count: 0,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_expiry() {
        let now = Utc::now();
        assert!(!link(None).is_expired_at(now));
        assert!(!link(Some(now + chrono::Duration::hours(1))).is_expired_at(now));
        assert!(link(Some(now - chrono::Duration::seconds(1))).is_expired_at(now));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(link(None)).unwrap();
        assert_eq!(json["type"], "itinerary");
        assert_eq!(json["accessCount"], 0);
        assert_eq!(json["isRevoked"], false);
        assert_eq!(json["itineraryData"]["events"][0]["id"], "E1");
    }
}
