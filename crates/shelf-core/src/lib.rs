//! SHELF Core Library
//!
//! This crate provides the core functionality for SHELF, a personal
//! library catalog: a single user records books and can add, remove,
//! search, list, and summarize them.
//!
//! # Architecture
//!
//! - **JSON file**: Source of truth, one array of book objects
//! - **Library**: In-memory collection, loaded wholesale and persisted
//!   wholesale after every mutation
//!
//! The crate never touches the console. Presentation lives in `shelf-cli`.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! // Add a book
//! store.add_book(Book::new("Dune", "Herbert", "1965", "SciFi", true))?;
//!
//! // Query books
//! let hits = store.search(SearchField::Title, "dune");
//! ```
//!
//! # Modules
//!
//! - `store`: Unified storage interface (main entry point)
//! - `models`: Book records, search fields, statistics
//! - `library`: The ordered book collection and its projections
//! - `operation`: Pure dispatch of catalog operations
//! - `storage`: JSON persistence
//! - `config`: Application configuration

pub mod config;
pub mod error;
pub mod library;
pub mod models;
pub mod operation;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{LibraryError, LibraryResult};
pub use library::Library;
pub use models::{Book, SearchField, Statistics};
pub use operation::{apply, Operation, Outcome};
pub use storage::{JsonPersistence, StorageError, StorageResult};
pub use store::Store;
