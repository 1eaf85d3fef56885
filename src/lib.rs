//! JBits: small building blocks shared across apps
//!
//! The centerpiece is a sound-effect dispatcher: an [`AssetProvider`] lists the
//! sounds an app uses, a [`PlayerPool`] keeps one prepared player per sound and
//! the [`AudioDispatcher`] plays requested sounds, substituting a short fallback
//! sound when the requested one is still playing. Next to it live a couple of
//! persistence helpers for JSON values and string-keyed property lists.
//!
//! # Crate feature flags
//! - `rodio-backend` (opt-in): Native audio output through `rodio` (`RodioBackend`)
//!   and the `jbits-play` command line player
//!
//! # Quick start
//! ```
//! use std::sync::Arc;
//! use jbits::audio::{AudioAsset, AudioDispatcher, PlayOutcome, SimulatedBackend, StaticAssetProvider};
//!
//! let ding = AudioAsset::new("ding", "caf", 0.5);
//! let tick = AudioAsset::new("tick", "caf", 0.3);
//!
//! let backend = SimulatedBackend::with_resources(["ding.caf", "tick.caf"]);
//! let dispatcher = AudioDispatcher::new(backend);
//!
//! let provider = Arc::new(StaticAssetProvider::new(vec![ding.clone()]).with_fallback(tick));
//! dispatcher.assign_provider(&provider);
//! dispatcher.refresh_audio_assets().unwrap();
//!
//! let outcome = dispatcher.request_play(&ding).unwrap();
//! assert!(matches!(outcome, PlayOutcome::Played { .. }));
//! ```

#![warn(missing_docs)]

pub mod audio; // Sound-effect playback
pub mod config; // Audio configuration files
pub mod logging; // Log categories and logger setup
pub mod persistence; // JSON values in cache/document directories
pub mod property_list; // String-keyed dictionaries with bundled defaults

/// Error types for JBits operations
#[derive(thiserror::Error, Debug)]
pub enum JbitsError {
    /// Missing or invalid configuration, e.g. no asset provider attached
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named resource could not be located
    #[error("Resource missing: {0}")]
    ResourceMissing(String),

    /// The shared audio session could not be configured
    #[error("Audio session unavailable: {0}")]
    SessionUnavailable(String),

    /// Native player construction or playback failed
    #[error("Audio device error: {0}")]
    AudioDevice(String),

    /// A value could not be encoded; nothing was written
    #[error("Failed to encode data needed for save operation; no file was created: {0}")]
    Encoding(String),

    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for JbitsError {
    /// Converts a String into `JbitsError::Other`.
    ///
    /// Prefer the specific variants where the failure has a known cause.
    fn from(msg: String) -> Self {
        JbitsError::Other(msg)
    }
}

impl From<&str> for JbitsError {
    fn from(msg: &str) -> Self {
        JbitsError::Other(msg.to_string())
    }
}

/// Result type for JBits operations
pub type Result<T> = std::result::Result<T, JbitsError>;

// Public API exports
pub use audio::{
    play_request_channel, AssetProvider, AudioAsset, AudioBackend, AudioDispatcher, AudioHandle,
    PlayOutcome, PlayRequest, PlayRequestReceiver, PlayRequestSender, PlaybackState, PlayerPool,
    RefreshSummary, ResourceBundle, SessionCategory, SessionConfig, SessionState,
    SimulatedBackend, StaticAssetProvider,
};
#[cfg(feature = "rodio-backend")]
pub use audio::RodioBackend;
pub use config::AudioConfig;
pub use logging::{init_logging, LogCategory};
pub use persistence::{PersistentData, StorageLocation};
pub use property_list::{Properties, PropertyList};
