//! Client-local itinerary payloads from before server-side storage.

pub mod payload;

pub use payload::{LegacyEvent, LegacyPayload, RejectedRecord, UNNAMED_EVENT};
