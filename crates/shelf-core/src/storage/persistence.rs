//! Library file persistence
//!
//! Handles saving and loading the book collection to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) so the library
//! file is always replaced in full.
//!
//! Storage location: `~/.local/share/shelf/library.json` (configurable via `Config`)

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::library::Library;
use crate::storage::error::{StorageError, StorageResult};

/// Indentation used for the pretty-printed library file
const INDENT: &[u8] = b"    ";

/// Persistence layer for the library file
#[derive(Debug, Clone)]
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a persistence handler for the library file named by `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.library_path())
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the library file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the library, creating an empty one if needed
    ///
    /// A missing or zero-length file is initialized to `[]` on disk and an
    /// empty library is returned. Content that is not a JSON array of books
    /// is an error; nothing is rewritten in that case.
    pub fn load(&self) -> StorageResult<Library> {
        if self.is_blank()? {
            warn!("Library file {:?} missing or empty, initializing", self.path);
            let library = Library::new();
            self.save(&library)?;
            return Ok(library);
        }

        let bytes =
            fs::read(&self.path).map_err(|e| StorageError::from_read(e, self.path.clone()))?;

        // Undecodable bytes, including invalid UTF-8, are a format error
        let library: Library =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        debug!("Loaded {} book(s) from {:?}", library.len(), self.path);
        Ok(library)
    }

    /// Overwrite the library file with the full collection
    pub fn save(&self, library: &Library) -> StorageResult<()> {
        let bytes = to_pretty_json(library)?;

        atomic_write(&self.path, &bytes)?;

        debug!(
            "Saved {} book(s) to {:?} ({} bytes)",
            library.len(),
            self.path,
            bytes.len()
        );
        Ok(())
    }

    /// True when the file is absent or has no content
    fn is_blank(&self) -> StorageResult<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(StorageError::from_read(e, self.path.clone())),
        }
    }
}

/// Serialize with four-space indentation and a trailing newline
fn to_pretty_json(library: &Library) -> StorageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut bytes, formatter);
    library
        .serialize(&mut serializer)
        .map_err(StorageError::Serialize)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// This ensures the target file is never left in a partially-written state.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = temp_path_for(path);

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    // Sync to disk before rename
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path.clone(),
        to: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Sibling temp file: `library.json` -> `library.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
