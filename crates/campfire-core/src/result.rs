//! Convenience result type alias for Campfire.

use crate::error::AppError;

/// A specialized `Result` type for Campfire operations.
pub type AppResult<T> = Result<T, AppError>;
