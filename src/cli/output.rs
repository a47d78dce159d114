//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StorageError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::StorageError(StorageError::FileRead { path, source }) => {
            format!("Cannot read {}: {}", path.display(), source)
        }
        ApiError::StorageError(StorageError::DirectoryList { path, message }) => {
            format!("Cannot list {}: {}", path.display(), message)
        }
        _ => e.to_string(),
    }
}
