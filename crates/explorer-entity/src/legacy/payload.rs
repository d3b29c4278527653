//! Legacy payload parsing and conversion.
//!
//! Browsers that used the app before itineraries moved server-side hold a
//! JSON array of saved events in local storage. The shape was never
//! enforced, so every record is validated here before it becomes an
//! [`Event`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use explorer_core::error::AppError;

use crate::event::Event;

/// Name used for legacy records whose name is missing or blank.
pub const UNNAMED_EVENT: &str = "Unnamed Event";

/// One saved event in the legacy client format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyEvent {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Start as the client stored it; becomes [`Event::date`].
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl LegacyEvent {
    /// Converts into the canonical event shape.
    pub fn into_event(self) -> Event {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_EVENT.to_string());

        Event {
            id: self.id,
            name,
            date: self.start.filter(|s| !s.trim().is_empty()),
            url: self.url,
            image_url: self.image_url,
            description: self.description,
            ..Event::default()
        }
    }
}

/// A record that could not be used, with its position in the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// Zero-based index in the source array.
    pub index: usize,
    /// Why the record was dropped.
    pub reason: String,
}

/// A validated legacy payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyPayload {
    /// Usable records, first occurrence of each id, in source order.
    pub events: Vec<LegacyEvent>,
    /// Records that were dropped.
    pub rejected: Vec<RejectedRecord>,
}

impl LegacyPayload {
    /// Parses a raw payload.
    ///
    /// Accepts either a bare array of records or an object with an
    /// `events` array. Anything else is a validation error. Individual
    /// records that fail to decode, lack an id, or repeat an earlier id are
    /// reported in [`LegacyPayload::rejected`] instead of failing the whole
    /// payload.
    pub fn parse(raw: &Value) -> Result<Self, AppError> {
        let records = match raw {
            Value::Array(items) => items,
            Value::Object(map) => match map.get("events") {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(AppError::validation(
                        "Legacy payload object must contain an events array",
                    ));
                }
            },
            _ => {
                return Err(AppError::validation(
                    "Legacy payload must be an array of events",
                ));
            }
        };

        let mut payload = Self::default();
        let mut seen = HashSet::new();

        for (index, record) in records.iter().enumerate() {
            let event = match serde_json::from_value::<LegacyEvent>(record.clone()) {
                Ok(event) => event,
                Err(e) => {
                    payload.rejected.push(RejectedRecord {
                        index,
                        reason: format!("malformed record: {e}"),
                    });
                    continue;
                }
            };

            if event.id.trim().is_empty() {
                payload.rejected.push(RejectedRecord {
                    index,
                    reason: "missing id".to_string(),
                });
                continue;
            }

            if !seen.insert(event.id.clone()) {
                payload.rejected.push(RejectedRecord {
                    index,
                    reason: format!("duplicate id {}", event.id),
                });
                continue;
            }

            payload.events.push(event);
        }

        Ok(payload)
    }

    /// Returns whether no usable record remains.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Converts every usable record into a canonical event.
    pub fn into_events(self) -> Vec<Event> {
        self.events.into_iter().map(LegacyEvent::into_event).collect()
    }
}
