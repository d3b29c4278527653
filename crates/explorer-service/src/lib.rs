//! # explorer-service
//!
//! Business logic for WorldExplorer. Services own validation and
//! ownership rules and delegate persistence to the repository traits
//! of `explorer-database`.

pub mod calendar;
pub mod context;
pub mod itinerary;
pub mod migration;
pub mod services;
pub mod share;

pub use context::RequestContext;
pub use services::Services;
