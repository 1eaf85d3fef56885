//! Playable sound descriptors

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named, typed, volume-scaled sound resource.
///
/// Two assets are the same sound when their [`identity`](AudioAsset::identity)
/// (`name.extension`) matches; the volume only affects how the prepared player
/// is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAudioAsset")]
pub struct AudioAsset {
    name: String,
    file_extension: String,
    volume: f32,
}

impl AudioAsset {
    /// Create an asset descriptor.
    ///
    /// # Arguments
    /// * `name` - Resource name without extension (e.g. `"ding"`)
    /// * `file_extension` - Resource type (e.g. `"caf"`, `"wav"`)
    /// * `volume` - Playback volume, clamped into `0.0..=1.0` (NaN plays at full volume)
    pub fn new(name: impl Into<String>, file_extension: impl Into<String>, volume: f32) -> Self {
        Self {
            name: name.into(),
            file_extension: file_extension.into(),
            volume: clamp_volume(volume),
        }
    }

    /// Create an asset from a file name such as `"greatAudio.wav"`.
    ///
    /// The text after the last `.` becomes the extension. A name without an
    /// extension uses `default_extension`.
    pub fn from_file_name(file_name: &str, default_extension: &str, volume: f32) -> Self {
        let file_name = file_name.trim_end_matches('.');
        match file_name.rsplit_once('.') {
            Some((name, ext)) if !name.is_empty() => Self::new(name, ext, volume),
            _ => Self::new(file_name, default_extension, volume),
        }
    }

    /// Resource name without extension
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resource type
    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    /// Playback volume in `0.0..=1.0`, where 0 is inaudible and 1 plays at recorded level
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Key used by the player pool: `name.extension`
    pub fn identity(&self) -> String {
        format!("{}.{}", self.name, self.file_extension)
    }
}

/// Wire form of [`AudioAsset`]; decoded assets go through [`AudioAsset::new`]
#[derive(Deserialize)]
struct RawAudioAsset {
    name: String,
    file_extension: String,
    volume: f32,
}

impl From<RawAudioAsset> for AudioAsset {
    fn from(raw: RawAudioAsset) -> Self {
        AudioAsset::new(raw.name, raw.file_extension, raw.volume)
    }
}

impl fmt::Display for AudioAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.name, self.file_extension)
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        1.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
