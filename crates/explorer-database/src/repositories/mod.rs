//! Repository traits and their PostgreSQL implementations.

pub mod itinerary;
pub mod shared_link;

pub use itinerary::{AppendOutcome, ItineraryRepository, PgItineraryRepository};
pub use shared_link::{PgSharedLinkRepository, SharedLinkRepository};

use explorer_core::error::{AppError, ErrorKind};

/// Wrap a sqlx failure; unique violations surface as conflicts.
pub(crate) fn db_error(context: &str, err: sqlx::Error) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        AppError::with_source(ErrorKind::Conflict, context.to_string(), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
