//! # explorer-api
//!
//! HTTP API layer for WorldExplorer built on Axum.
//!
//! Provides the REST endpoints for itineraries, shared links, calendar
//! export and client migration, plus extractors, DTOs, middleware and the
//! mapping from `AppError` to HTTP responses.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
