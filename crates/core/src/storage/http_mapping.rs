//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`RepositoryError`]
//! variants, following the Functional Core pattern - pure functions with no
//! side effects.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `DuplicateFiscalCode` -> 400 (Bad Request)
/// - `InvalidData` -> 400 (Bad Request)
/// - `Corrupted` -> 500 (Internal Server Error)
/// - `Io` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use anagrafe_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound { id: 7 };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::DuplicateFiscalCode { .. } => 400,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::Corrupted(_) => 500,
        RepositoryError::Io(_) => 500,
    }
}
