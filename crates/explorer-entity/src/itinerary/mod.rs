//! Itinerary aggregate.

pub mod model;

pub use model::{CreateItinerary, DEFAULT_ITINERARY_NAME, Itinerary, UpdateItinerary};
