//! String-keyed dictionaries stored as JSON files
//!
//! A property list saved by the user lives in the documents directory. Until
//! one has been saved, loading falls back to the default copy shipped in the
//! resource bundle.

use crate::audio::ResourceBundle;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

const LOG_TARGET: &str = "jbits::persistence";
const FILE_TYPE: &str = "json";

/// Dictionary content of a property list
pub type Properties = Map<String, Value>;

/// Named dictionaries in a documents directory, with bundled defaults.
#[derive(Debug, Clone)]
pub struct PropertyList {
    documents_dir: PathBuf,
    bundle: ResourceBundle,
}

impl PropertyList {
    /// Property lists saved under `documents_dir`, defaults read from `bundle`
    pub fn new(documents_dir: impl Into<PathBuf>, bundle: ResourceBundle) -> Self {
        Self {
            documents_dir: documents_dir.into(),
            bundle,
        }
    }

    /// Property lists saved in the user's document directory.
    ///
    /// Returns `None` when the platform has no document directory.
    pub fn user_documents(bundle: ResourceBundle) -> Option<Self> {
        dirs::document_dir().map(|documents_dir| Self::new(documents_dir, bundle))
    }

    /// Full path for a property list named `name` (without extension)
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.documents_dir.join(format!("{name}.{FILE_TYPE}"))
    }

    /// Check if the user has a saved copy of `name`
    pub fn found_file(&self, name: &str) -> bool {
        self.document_path(name).is_file()
    }

    /// Read the default copy of `name` from the bundle
    pub fn from_bundle(&self, name: &str) -> Option<Properties> {
        let path = self.bundle.locate(name, FILE_TYPE)?;
        read_properties(&path)
    }

    /// Write `content` to the documents directory, replacing any previous copy
    /// atomically. Returns true on success.
    pub fn save(&self, content: &Properties, name: &str) -> bool {
        match self.write_atomically(content, name) {
            Ok(()) => true,
            Err(err) => {
                log::warn!(target: LOG_TARGET, "Failed to save property list \"{name}\": {err}");
                false
            }
        }
    }

    fn write_atomically(&self, content: &Properties, name: &str) -> crate::Result<()> {
        fs::create_dir_all(&self.documents_dir)?;
        let mut file = tempfile::NamedTempFile::new_in(&self.documents_dir)?;
        serde_json::to_writer_pretty(&mut file, content)?;
        file.flush()?;
        file.persist(self.document_path(name))
            .map_err(|e| crate::JbitsError::Io(e.error))?;
        Ok(())
    }

    /// Load the saved copy of `name`, or the bundled default if none was saved.
    ///
    /// A saved copy that cannot be read yields `None`; it does not fall back.
    pub fn load(&self, name: &str) -> Option<Properties> {
        let path = self.document_path(name);
        if path.exists() {
            read_properties(&path)
        } else {
            self.from_bundle(name)
        }
    }

    /// Delete the saved copy of `name`, restoring the bundled default
    pub fn remove_file(&self, name: &str) {
        let _ = fs::remove_file(self.document_path(name));
    }
}

fn read_properties(path: &std::path::Path) -> Option<Properties> {
    let data = fs::read(path).ok()?;
    match serde_json::from_slice::<Value>(&data) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => {
            log::debug!(target: LOG_TARGET, "{} is not a dictionary", path.display());
            None
        }
        Err(err) => {
            log::debug!(target: LOG_TARGET, "Cannot decode {}: {err}", path.display());
            None
        }
    }
}
