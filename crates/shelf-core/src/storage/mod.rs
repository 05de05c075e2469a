//! Storage layer
//!
//! Handles persistence of the book collection as a single JSON file.
//!
//! ## Format
//!
//! A pretty-printed array of book objects with the keys `title`, `author`,
//! `year`, `genre` and `read`. A missing or zero-length file is treated as
//! an empty array and rewritten as `[]`.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
