//! Convenience result type alias for InfraDesk.

use crate::error::AppError;

/// A specialized `Result` type for InfraDesk operations.
pub type AppResult<T> = Result<T, AppError>;
