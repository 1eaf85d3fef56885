//! Resource lookup
//!
//! A bundle is a directory of resources addressed by name and type, the way
//! sounds and default property lists ship next to an app.

use super::asset::AudioAsset;
use crate::{JbitsError, Result};
use std::path::{Path, PathBuf};

/// Directory of named, typed resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBundle {
    root: PathBuf,
}

impl ResourceBundle {
    /// Bundle rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name.file_type` if it exists as a file
    pub fn locate(&self, name: &str, file_type: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let path = self.root.join(format!("{name}.{file_type}"));
        path.is_file().then_some(path)
    }

    /// Like [`locate`](Self::locate), but a missing resource is an error
    pub fn require(&self, name: &str, file_type: &str) -> Result<PathBuf> {
        self.locate(name, file_type).ok_or_else(|| {
            JbitsError::ResourceMissing(format!(
                "{name}.{file_type} not found in {}",
                self.root.display()
            ))
        })
    }

    /// Locate the resource backing `asset`
    pub fn locate_asset(&self, asset: &AudioAsset) -> Option<PathBuf> {
        self.locate(asset.name(), asset.file_extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_locate_existing_resource() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ding.caf"), b"data").unwrap();

        let bundle = ResourceBundle::new(dir.path());
        assert_eq!(
            bundle.locate("ding", "caf"),
            Some(dir.path().join("ding.caf"))
        );
        assert!(bundle
            .locate_asset(&AudioAsset::new("ding", "caf", 1.0))
            .is_some());
    }

    #[test]
    fn test_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ResourceBundle::new(dir.path());

        assert!(bundle.locate("ding", "wav").is_none());
        assert!(matches!(
            bundle.require("ding", "wav"),
            Err(JbitsError::ResourceMissing(_))
        ));
    }

    #[test]
    fn test_directories_are_not_resources() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sounds.caf")).unwrap();

        let bundle = ResourceBundle::new(dir.path());
        assert!(bundle.locate("sounds", "caf").is_none());
        assert!(bundle.locate("", "caf").is_none());
    }
}
