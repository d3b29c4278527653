//! One-shot migration of client-local itineraries.

pub mod service;
pub mod store;

pub use service::{MigrationOutcome, MigrationService, SkipReason};
pub use store::{LegacyPayloadStore, MemoryLegacyPayloadStore};
