//! Convenience result type alias for the filing system.

use crate::error::AppError;

/// A specialized `Result` type for filing operations.
pub type AppResult<T> = Result<T, AppError>;
