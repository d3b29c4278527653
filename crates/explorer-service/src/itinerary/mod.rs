//! Itinerary store operations.

pub mod service;
pub mod validation;

pub use service::{ItineraryService, NewItinerary};
