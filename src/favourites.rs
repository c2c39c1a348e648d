//! Favourites persistence.
//!
//! The in-memory list is the source of truth while the app runs. The file is
//! a snapshot: read once at launch, rewritten whole on backgrounding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{FavouritesList, SavedDog};

/// Errors that can occur reading or writing the favourites file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read favourites file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse favourites file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode favourites: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Failed to write favourites file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    /// True when the file simply isn't there yet (first launch).
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Writes `list` as JSON to `path`, replacing any existing file.
///
/// The content goes to a sibling `.tmp` file first and is renamed over the
/// destination, so readers never observe a half-written list.
pub fn persist(list: &[SavedDog], path: &Path) -> Result<(), StoreError> {
    let text = serde_json::to_string_pretty(list).map_err(StoreError::Encode)?;
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, text).map_err(write_err)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(e));
    }

    tracing::debug!(path = %path.display(), count = list.len(), "persisted favourites");
    Ok(())
}

/// Reads and decodes the favourites file, reporting why it failed.
pub fn try_load(path: &Path) -> Result<FavouritesList, StoreError> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&text).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads the favourites file, falling back to an empty list.
///
/// A missing file is the normal first-launch case and is only logged at
/// debug level; unreadable or corrupt files are logged as warnings.
pub fn load(path: &Path) -> FavouritesList {
    match try_load(path) {
        Ok(list) => {
            tracing::debug!(path = %path.display(), count = list.len(), "loaded favourites");
            list
        }
        Err(e) if e.is_not_found() => {
            tracing::debug!(path = %path.display(), "no saved favourites yet");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable favourites file");
            Vec::new()
        }
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// In-memory favourites bound to their file.
#[derive(Debug, Clone)]
pub struct FavouritesStore {
    entries: FavouritesList,
    path: PathBuf,
}

impl FavouritesStore {
    /// Empty store that will persist to `path`.
    pub fn new(path: PathBuf) -> Self {
        Self {
            entries: Vec::new(),
            path,
        }
    }

    /// Store populated from `path` (empty if absent or corrupt).
    pub fn open(path: PathBuf) -> Self {
        let entries = load(&path);
        Self { entries, path }
    }

    /// Appends unconditionally. Callers decide whether a repeat is wanted.
    pub fn append(&mut self, entry: SavedDog) {
        self.entries.push(entry);
    }

    /// Puts entries read from disk ahead of anything appended before the
    /// read finished.
    pub fn merge_loaded(&mut self, mut loaded: FavouritesList) {
        loaded.append(&mut self.entries);
        self.entries = loaded;
    }

    pub fn entries(&self) -> &[SavedDog] {
        &self.entries
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn persist(&self) -> Result<(), StoreError> {
        persist(&self.entries, &self.path)
    }
}
