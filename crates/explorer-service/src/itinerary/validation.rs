//! Event checks applied before anything reaches storage.

use std::collections::HashSet;

use explorer_core::error::AppError;
use explorer_entity::event::Event;

/// An event needs a non-blank id and name.
pub fn validate_event(event: &Event) -> Result<(), AppError> {
    if event.id.trim().is_empty() {
        return Err(AppError::validation("Event id is required"));
    }
    if event.name.trim().is_empty() {
        return Err(AppError::validation("Event name is required"));
    }
    Ok(())
}

/// Validates every event and rejects repeated ids.
pub fn validate_event_list(events: &[Event]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        validate_event(event)?;
        if !seen.insert(event.id.as_str()) {
            return Err(AppError::conflict(format!(
                "Duplicate event id in list: {}",
                event.id
            )));
        }
    }
    Ok(())
}
