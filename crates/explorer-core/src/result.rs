//! Convenience result type alias for WorldExplorer.

use crate::error::AppError;

/// A specialized `Result` type for WorldExplorer operations.
pub type AppResult<T> = Result<T, AppError>;
