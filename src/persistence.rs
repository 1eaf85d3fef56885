//! JSON persistence in the user's cache or document directory
//!
//! Values are written as pretty-printed JSON. Loading is forgiving: a missing,
//! empty or undecodable file simply yields `None`.

use crate::{JbitsError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "jbits::persistence";

/// Directory a file is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageLocation {
    /// Cache directory; the system may purge it
    #[default]
    Caches,
    /// User document directory
    Documents,
}

/// Saves and loads serializable values as JSON files.
///
/// # Example
///
/// ```
/// use jbits::{PersistentData, StorageLocation};
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = PersistentData::with_dirs(dir.path().join("cache"), dir.path().join("docs"));
///
/// store.save(&vec![1, 2, 3], "numbers.json", StorageLocation::Caches).unwrap();
/// let numbers: Option<Vec<u32>> = store.load("numbers.json", StorageLocation::Caches);
/// assert_eq!(numbers, Some(vec![1, 2, 3]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistentData {
    caches_dir: Option<PathBuf>,
    documents_dir: Option<PathBuf>,
}

impl Default for PersistentData {
    fn default() -> Self {
        Self::user_dirs()
    }
}

impl PersistentData {
    /// Store using the platform cache and document directories
    pub fn user_dirs() -> Self {
        Self {
            caches_dir: dirs::cache_dir(),
            documents_dir: dirs::document_dir(),
        }
    }

    /// Store using explicit directories
    pub fn with_dirs(caches_dir: impl Into<PathBuf>, documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            caches_dir: Some(caches_dir.into()),
            documents_dir: Some(documents_dir.into()),
        }
    }

    /// Directory for `location`, if the platform has one
    pub fn directory(&self, location: StorageLocation) -> Option<&Path> {
        match location {
            StorageLocation::Caches => self.caches_dir.as_deref(),
            StorageLocation::Documents => self.documents_dir.as_deref(),
        }
    }

    /// Full path of `file_name` in `location`
    pub fn path(&self, file_name: &str, location: StorageLocation) -> Option<PathBuf> {
        self.directory(location).map(|dir| dir.join(file_name))
    }

    /// Save `value` as pretty-printed JSON.
    ///
    /// Returns `Ok(false)` when the directory cannot be resolved or the file
    /// cannot be written, and [`JbitsError::Encoding`] when `value` cannot be
    /// serialized (in which case no file is created).
    pub fn save<T: Serialize + ?Sized>(
        &self,
        value: &T,
        file_name: &str,
        location: StorageLocation,
    ) -> Result<bool> {
        let Some(path) = self.path(file_name, location) else {
            log::warn!(target: LOG_TARGET, "No {location:?} directory for \"{file_name}\"");
            return Ok(false);
        };

        let data = serde_json::to_vec_pretty(value).map_err(|e| JbitsError::Encoding(e.to_string()))?;

        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                log::warn!(target: LOG_TARGET, "Cannot create {}: {err}", parent.display());
                return Ok(false);
            }
        }

        match fs::write(&path, data) {
            Ok(()) => Ok(true),
            Err(err) => {
                log::warn!(target: LOG_TARGET, "Failed to write {}: {err}", path.display());
                Ok(false)
            }
        }
    }

    /// Load a value saved with [`save`](Self::save).
    ///
    /// Missing, empty and undecodable files all yield `None`.
    pub fn load<T: DeserializeOwned>(&self, file_name: &str, location: StorageLocation) -> Option<T> {
        let path = self.path(file_name, location)?;
        let data = fs::read(&path).ok()?;
        if data.is_empty() {
            return None;
        }

        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(err) => {
                log::debug!(target: LOG_TARGET, "Cannot decode {}: {err}", path.display());
                None
            }
        }
    }

    /// Remove a saved file; returns true if a file was removed
    pub fn remove_file(&self, file_name: &str, location: StorageLocation) -> bool {
        let Some(path) = self.path(file_name, location) else {
            log::warn!(target: LOG_TARGET, "Failed to locate folder for filename {file_name}");
            return false;
        };
        fs::remove_file(path).is_ok()
    }
}
