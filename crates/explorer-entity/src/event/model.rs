//! Normalized representation of a bookable activity.

use serde::{Deserialize, Serialize};

/// A third-party event as stored inside an itinerary or a share snapshot.
///
/// Events are copied by value into their owner; there is no separate
/// event table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Provider-assigned identifier, unique within one itinerary.
    #[serde(default)]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Start date, usually `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Local start time, `HH:MM` or `HH:MM:SS`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Ticketing or details page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
}

/// Ticket price bounds as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Event {
    /// Creates an event with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Venue and place names joined with `", "`, skipping blanks.
    ///
    /// Returns `None` when no location field carries text.
    pub fn location_label(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.venue, &self.city, &self.state, &self.country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_shape() {
        let json = r#"{
            "id": "G5vYZ9",
            "name": "Inti Raymi",
            "date": "2025-06-24",
            "city": "Cusco",
            "imageUrl": "https://img.example/inti.jpg",
            "priceRange": {"min": 45.0, "currency": "USD"}
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "G5vYZ9");
        assert_eq!(event.image_url.as_deref(), Some("https://img.example/inti.jpg"));
        assert_eq!(event.price_range.unwrap().min, Some(45.0));
        assert!(event.venue.is_none());
    }

    #[test]
    fn test_missing_required_fields_deserialize_blank() {
        let event: Event = serde_json::from_str(r#"{"date": "2025-01-01"}"#).unwrap();
        assert!(event.id.is_empty());
        assert!(event.name.is_empty());
    }

    #[test]
    fn test_serialize_omits_absent_fields() {
        let json = serde_json::to_value(Event::new("E1", "Fiesta")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "E1", "name": "Fiesta"}));
    }

    #[test]
    fn test_location_label() {
        let mut event = Event::new("E1", "Fiesta");
        assert_eq!(event.location_label(), None);

        event.venue = Some("Sacsayhuamán".to_string());
        event.city = Some("Cusco".to_string());
        event.state = Some("  ".to_string());
        event.country = Some("PE".to_string());
        assert_eq!(event.location_label().as_deref(), Some("Sacsayhuamán, Cusco, PE"));
    }
}
