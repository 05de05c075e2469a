//! Catalog operations as values
//!
//! `apply` maps a library and an operation to the next library and an
//! outcome describing what happened. It performs no I/O; the `Store`
//! decides whether the outcome needs persisting.

use serde::Serialize;

use crate::error::LibraryResult;
use crate::library::Library;
use crate::models::{Book, SearchField, Statistics};

/// A request against the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Append a book
    Add(Book),
    /// Remove every book with this title (case-insensitive)
    Remove { title: String },
    /// Case-insensitive substring search over one field
    Search { field: SearchField, term: String },
    /// Every book in stored order
    ListAll,
    /// Reading statistics
    Statistics,
}

impl Operation {
    /// Build a search from a user-supplied field name
    ///
    /// Fails with `LibraryError::InvalidSearchField` for anything other than
    /// `title` or `author`.
    pub fn search(field: &str, term: impl Into<String>) -> LibraryResult<Self> {
        Ok(Operation::Search {
            field: field.parse()?,
            term: term.into(),
        })
    }
}

/// Result of applying an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The book was appended
    Added { book: Book },
    /// `count` books titled `title` were removed
    Removed { title: String, count: usize },
    /// No book titled `title` exists; nothing changed
    NotFound { title: String },
    /// Search results, possibly empty
    Found {
        field: SearchField,
        term: String,
        books: Vec<Book>,
    },
    /// The full collection
    Listed { books: Vec<Book> },
    /// Reading statistics
    Stats { statistics: Statistics },
}

impl Outcome {
    /// Whether the collection changed and must be persisted
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Added { .. } | Outcome::Removed { .. })
    }
}

/// Apply an operation to a library
///
/// Returns the resulting library alongside the outcome. Read-only
/// operations hand back the library unchanged.
pub fn apply(library: Library, operation: Operation) -> (Library, Outcome) {
    match operation {
        Operation::Add(book) => {
            // Text fields are stored trimmed
            let book = book.trimmed();
            (library.with_book(book.clone()), Outcome::Added { book })
        }
        Operation::Remove { title } => {
            let title = title.trim().to_string();
            let (remaining, count) = library.without_title(&title);
            if count > 0 {
                (remaining, Outcome::Removed { title, count })
            } else {
                (library, Outcome::NotFound { title })
            }
        }
        Operation::Search { field, term } => {
            let term = term.trim().to_string();
            let books = library.search(field, &term).cloned().collect();
            (library, Outcome::Found { field, term, books })
        }
        Operation::ListAll => {
            let books = library.books().to_vec();
            (library, Outcome::Listed { books })
        }
        Operation::Statistics => {
            let statistics = library.statistics();
            (library, Outcome::Stats { statistics })
        }
    }
}
