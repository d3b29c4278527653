//! Shared link domain entities.

pub mod model;

pub use model::{CreateSharedLink, ItinerarySnapshot, SharedLink, SharedLinkType};
