//! Unified storage interface
//!
//! The `Store` owns the in-memory `Library` and the file it was loaded
//! from. Every accepted mutation is written through before the in-memory
//! copy changes, so the two never diverge.
//!
//! ## Lifecycle
//!
//! Open (load or initialize), then any number of operations, then drop.
//! There is no explicit close; nothing is buffered.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;  // Creates or loads existing
//!
//! store.add_book(Book::new("Dune", "Herbert", "1965", "SciFi", true))?;
//!
//! let stats = store.statistics();
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::LibraryResult;
use crate::library::Library;
use crate::models::{Book, SearchField, Statistics};
use crate::operation::{apply, Operation, Outcome};
use crate::storage::{JsonPersistence, StorageResult};

/// The library store
///
/// Holds the collection and writes it back in full after each mutation.
#[derive(Debug)]
pub struct Store {
    /// The loaded collection
    library: Library,
    /// Library file handler
    persistence: JsonPersistence,
    /// Configuration
    config: Config,
}

impl Store {
    /// Open the store using the default configuration
    ///
    /// On first run the library file is created holding `[]`.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::from_config(&config);

        let library = persistence
            .load()
            .with_context(|| format!("Failed to load library from {:?}", persistence.path()))?;

        Ok(Self {
            library,
            persistence,
            config,
        })
    }

    /// Open the store on an exact library file
    pub fn open_at(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let config = Config::with_library_path(path);
        let persistence = JsonPersistence::from_config(&config);
        let library = persistence.load()?;

        Ok(Self {
            library,
            persistence,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// The in-memory collection
    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn len(&self) -> usize {
        self.library.len()
    }

    pub fn is_empty(&self) -> bool {
        self.library.is_empty()
    }

    /// Re-read the library file, discarding the in-memory copy
    pub fn reload(&mut self) -> StorageResult<()> {
        self.library = self.persistence.load()?;
        Ok(())
    }

    /// Apply an operation, persisting the result if it changed anything
    ///
    /// The file is written before the in-memory library is replaced. A
    /// failed save leaves both untouched.
    pub fn execute(&mut self, operation: Operation) -> StorageResult<Outcome> {
        debug!("Executing {:?}", operation);
        let (next, outcome) = apply(self.library.clone(), operation);

        if outcome.changed() {
            self.persistence.save(&next)?;
            self.library = next;
            info!("Library updated: {} book(s)", self.library.len());
        }

        Ok(outcome)
    }

    // ==================== Book Operations ====================

    /// Add a book at the end of the collection
    pub fn add_book(&mut self, book: Book) -> StorageResult<()> {
        self.execute(Operation::Add(book))?;
        Ok(())
    }

    /// Remove every book whose title matches, ignoring case
    ///
    /// Returns the number of books removed. Zero means no book matched and
    /// the library file was not rewritten.
    pub fn remove_book(&mut self, title: &str) -> StorageResult<usize> {
        let outcome = self.execute(Operation::Remove {
            title: title.to_string(),
        })?;

        Ok(match outcome {
            Outcome::Removed { count, .. } => count,
            _ => 0,
        })
    }

    /// Books whose `field` contains `term`, ignoring case
    pub fn search(&self, field: SearchField, term: &str) -> Vec<Book> {
        self.library.search(field, term).cloned().collect()
    }

    /// Search by a field name as typed by the user
    pub fn search_by(&self, field: &str, term: &str) -> LibraryResult<Vec<Book>> {
        let field: SearchField = field.parse()?;
        Ok(self.search(field, term))
    }

    /// All books in stored order
    pub fn list_all(&self) -> &[Book] {
        self.library.books()
    }

    /// Reading statistics
    pub fn statistics(&self) -> Statistics {
        self.library.statistics()
    }
}
