//! HTTP request handlers, one module per domain.

pub mod calendar;
pub mod health;
pub mod itinerary;
pub mod migration;
pub mod share;
