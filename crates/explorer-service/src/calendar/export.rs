//! Calendar document generation.

use chrono::{DateTime, Duration, Utc};
use icalendar::{Calendar, Component, Event as CalendarEvent, EventLike};
use tracing::debug;

use explorer_core::config::CalendarConfig;
use explorer_core::error::AppError;
use explorer_entity::event::Event;

use super::format::{clean_uri, parse_start, text_value};

/// Serializes event lists into iCalendar documents. Never touches storage.
#[derive(Debug, Clone)]
pub struct CalendarService {
    product_id: String,
    uid_domain: String,
    duration: Duration,
}

impl CalendarService {
    /// Creates a new calendar service.
    pub fn new(config: &CalendarConfig) -> Self {
        Self {
            product_id: config.product_id.clone(),
            uid_domain: config.uid_domain.clone(),
            duration: Duration::minutes(config.default_duration_minutes.max(1)),
        }
    }

    /// Exports `events`, stamping the document with the current time.
    pub fn export(&self, events: &[Event]) -> Result<String, AppError> {
        self.export_at(events, Utc::now())
    }

    /// Exports `events` as of `now`.
    ///
    /// `now` is the `DTSTAMP` of every record and the start of any event
    /// whose date is missing or unreadable. Equal inputs give equal output.
    pub fn export_at(&self, events: &[Event], now: DateTime<Utc>) -> Result<String, AppError> {
        if events.is_empty() {
            return Err(AppError::validation("No events provided"));
        }

        let mut cal = Calendar::empty();
        cal.append_property(("VERSION", "2.0"));
        cal.append_property(("PRODID", self.product_id.as_str()));
        cal.append_property(("CALSCALE", "GREGORIAN"));

        for (index, event) in events.iter().enumerate() {
            cal.push(self.build_event(index, event, now));
        }

        let out = cal.done().to_string();
        debug!(events = events.len(), bytes = out.len(), "Calendar exported");
        Ok(out)
    }

    fn build_event(&self, index: usize, event: &Event, now: DateTime<Utc>) -> CalendarEvent {
        let start =
            parse_start(event.date.as_deref(), event.time.as_deref()).unwrap_or(now);

        let id = event.id.trim();
        let uid = if id.is_empty() {
            format!("event-{}@{}", index + 1, self.uid_domain)
        } else {
            format!("{}@{}", text_value(id), self.uid_domain)
        };
        let summary = match event.name.trim() {
            "" => "Event",
            _ => event.name.as_str(),
        };

        let mut ics_event = CalendarEvent::new();
        ics_event
            .uid(&uid)
            .timestamp(now)
            .starts(start)
            .ends(start + self.duration)
            .summary(&text_value(summary));
        if let Some(description) = non_blank(event.description.as_deref()) {
            ics_event.description(&text_value(description));
        }
        if let Some(location) = event.location_label() {
            ics_event.location(&text_value(&location));
        }
        if let Some(url) = non_blank(event.url.as_deref()) {
            ics_event.url(&clean_uri(url));
        }
        ics_event.done()
    }
}

/// `<name>.ics` reduced to letters, digits, space, `-` and `_`.
pub fn attachment_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "itinerary.ics".to_string()
    } else {
        format!("{cleaned}.ics")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use explorer_core::error::ErrorKind;

    use super::*;

    fn service() -> CalendarService {
        CalendarService::new(&CalendarConfig::default())
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn unescape(value: &str) -> String {
        let mut out = String::new();
        let mut chars = value.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.next() {
                    Some('n') => out.push('\n'),
                    Some(other) => out.push(other),
                    None => {}
                }
            } else {
                out.push(ch);
            }
        }
        out
    }

    fn property<'a>(doc: &'a str, name: &str) -> Vec<&'a str> {
        let prefix = format!("{name}:");
        doc.split("\r\n")
            .filter_map(|line| line.strip_prefix(prefix.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_list_is_invalid() {
        let err = service().export_at(&[], fixed_now()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_document_structure() {
        let mut event = Event::new("E1", "Inti Raymi");
        event.date = Some("2025-06-24".to_string());
        event.time = Some("10:00".to_string());
        event.city = Some("Cusco".to_string());
        event.country = Some("Peru".to_string());
        event.url = Some("https://tickets.example/E1".to_string());

        let doc = service().export_at(&[event], fixed_now()).unwrap();
        let expected = [
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//WorldExplorer//EN",
            "CALSCALE:GREGORIAN",
            "BEGIN:VEVENT",
            "DTEND:20250624T120000Z",
            "DTSTAMP:20250301T120000Z",
            "DTSTART:20250624T100000Z",
            "LOCATION:Cusco\\, Peru",
            "SUMMARY:Inti Raymi",
            "UID:E1@worldexplorer.app",
            "URL:https://tickets.example/E1",
            "END:VEVENT",
            "END:VCALENDAR",
            "",
        ]
        .join("\r\n");
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_missing_or_bad_date_starts_now() {
        let mut undated = Event::new("E1", "Walk");
        let mut garbled = Event::new("E2", "Tour");
        garbled.date = Some("sometime".to_string());
        undated.description = Some("   ".to_string());

        let doc = service().export_at(&[undated, garbled], fixed_now()).unwrap();
        assert_eq!(property(&doc, "DTSTART"), vec!["20250301T120000Z"; 2]);
        assert_eq!(property(&doc, "DTEND"), vec!["20250301T140000Z"; 2]);
        assert!(property(&doc, "DESCRIPTION").is_empty());
    }

    #[test]
    fn test_export_is_deterministic() {
        let mut a = Event::new("E1", "Inti Raymi");
        a.date = Some("2025-06-24T18:00:00Z".to_string());
        let b = Event::new("E2", "Lima Food Tour");
        let events = vec![a, b];

        let first = service().export_at(&events, fixed_now()).unwrap();
        let second = service().export_at(&events, fixed_now()).unwrap();
        assert_eq!(first, second);

        let later = service()
            .export_at(&events, fixed_now() + Duration::hours(1))
            .unwrap();
        let strip = |doc: &str| -> Vec<String> {
            doc.split("\r\n")
                .filter(|l| !l.starts_with("DTSTAMP:"))
                .map(str::to_string)
                .collect()
        };
        // E2 has no date, so its start follows the stamp.
        assert_eq!(strip(&first)[..10], strip(&later)[..10]);
    }

    #[test]
    fn test_special_characters_round_trip() {
        let name = "Rock, Paper; Scissors \\ Live\nNight two";
        let mut event = Event::new("E1", name);
        event.description = Some("Doors 7pm;\r\nbring ID, please".to_string());

        let doc = service().export_at(&[event], fixed_now()).unwrap();
        let unfolded = doc.replace("\r\n ", "");

        assert_eq!(unfolded.matches("BEGIN:VEVENT").count(), 1);
        assert_eq!(unfolded.matches("END:VEVENT").count(), 1);
        assert!(unfolded.split("\r\n").all(|line| !line.contains('\n')));

        let summary = property(&unfolded, "SUMMARY");
        assert_eq!(summary.len(), 1);
        assert_eq!(unescape(summary[0]), name);
        assert_eq!(
            unescape(property(&unfolded, "DESCRIPTION")[0]),
            "Doors 7pm;\nbring ID, please"
        );
    }

    #[test]
    fn test_blank_name_falls_back() {
        let doc = service()
            .export_at(&[Event::new("E1", "  ")], fixed_now())
            .unwrap();
        assert_eq!(property(&doc, "SUMMARY"), vec!["Event"]);
    }

    #[test]
    fn test_attachment_file_name() {
        assert_eq!(attachment_file_name("Peru Trip"), "Peru Trip.ics");
        assert_eq!(attachment_file_name("Lima/Cusco \"2025\""), "Lima_Cusco _2025_.ics");
        assert_eq!(attachment_file_name("   "), "itinerary.ics");
    }
}
