//! Library operation errors

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by catalog operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// Search requested against a field that is not searchable
    #[error("Invalid search field '{0}'. Please search by 'title' or 'author'.")]
    InvalidSearchField(String),

    /// Storage failed underneath an operation
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;
