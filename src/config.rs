//! Audio configuration files
//!
//! ```json
//! {
//!   "resource_root": "assets/sounds",
//!   "session": { "category": "ambient", "mix_with_others": true }
//! }
//! ```

use crate::audio::{ResourceBundle, SessionConfig};
use crate::{JbitsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where sounds live and how the audio session is set up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    /// Directory containing `name.ext` sound files
    pub resource_root: PathBuf,
    /// Session applied when the dispatcher is built
    pub session: SessionConfig,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            resource_root: PathBuf::from("."),
            session: SessionConfig::default(),
        }
    }
}

impl AudioConfig {
    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| JbitsError::Configuration(format!("Invalid audio config: {e}")))
    }

    /// Read a configuration file.
    ///
    /// A relative `resource_root` is resolved against the file's directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_json_str(&text)?;
        if config.resource_root.is_relative() {
            if let Some(parent) = path.parent() {
                config.resource_root = parent.join(&config.resource_root);
            }
        }
        Ok(config)
    }

    /// Bundle rooted at [`resource_root`](Self::resource_root)
    pub fn bundle(&self) -> ResourceBundle {
        ResourceBundle::new(&self.resource_root)
    }
}
