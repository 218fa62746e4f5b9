//! Convenience result type alias for DropVault.

use crate::error::AppError;

/// A specialized `Result` type for DropVault operations.
pub type AppResult<T> = Result<T, AppError>;
