//! Data models for SHELF
//!
//! Defines the core data structures: Book, SearchField, and Statistics.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;

/// A catalog entry
///
/// Every text field is free-form. `year` is kept as entered and never
/// parsed. Missing keys in stored data fall back to empty text and
/// `read = false`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Title, original casing preserved
    #[serde(default)]
    pub title: String,
    /// Author name
    #[serde(default)]
    pub author: String,
    /// Publication year as entered
    #[serde(default)]
    pub year: String,
    /// Genre
    #[serde(default)]
    pub genre: String,
    /// Whether the book has been read
    #[serde(default)]
    pub read: bool,
}

impl Book {
    /// Create a new book record
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// Return the record with surrounding whitespace stripped from every text field
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            year: self.year.trim().to_string(),
            genre: self.genre.trim().to_string(),
            read: self.read,
        }
    }

    /// Case-insensitive title equality
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Fields a search may run against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    Title,
    Author,
}

impl SearchField {
    /// Field name as the user types it
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
        }
    }

    /// Borrow the value of this field from a book
    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            _ => Err(LibraryError::InvalidSearchField(s.trim().to_string())),
        }
    }
}

/// Reading statistics over a collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of books
    pub total: usize,
    /// Books marked read
    pub read: usize,
    /// Books not yet read
    pub unread: usize,
    /// `read / total * 100`, zero for an empty collection
    pub percent_read: f64,
}

impl Statistics {
    /// Compute statistics for a slice of books
    pub fn from_books(books: &[Book]) -> Self {
        let total = books.len();
        let read = books.iter().filter(|b| b.read).count();
        let percent_read = if total > 0 {
            read as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            read,
            unread: total - read,
            percent_read,
        }
    }

    /// Percentage formatted with two decimals
    pub fn percent_display(&self) -> String {
        format!("{:.2}", self.percent_read)
    }
}
