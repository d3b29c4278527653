//! Event value object.

pub mod model;

pub use model::{Event, PriceRange};
