//! Result alias used across all Userdir crates.

use crate::error::UserdirError;

/// Result type with [`UserdirError`] as the error variant.
pub type UserdirResult<T> = Result<T, UserdirError>;
