//! Native audio collaborator interface
//!
//! The dispatcher never talks to an audio engine directly. A backend configures
//! the shared session and turns an [`AudioAsset`] into a prepared
//! [`AudioHandle`]; handles report whether they are playing and restart from
//! the beginning on request.

use super::asset::AudioAsset;
use super::session::SessionConfig;
use crate::Result;

/// Playback state of a prepared player.
///
/// Sound effects only ever go `Idle -> Playing -> Idle`; there is no pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Prepared and silent
    #[default]
    Idle,
    /// Currently producing sound
    Playing,
}

/// A prepared, ready-to-play player for a single asset.
pub trait AudioHandle: Send {
    /// Start playback from the beginning.
    fn play_from_start(&mut self) -> Result<()>;

    /// Current playback state.
    fn state(&self) -> PlaybackState;

    /// Check if currently playing.
    fn is_playing(&self) -> bool {
        self.state() == PlaybackState::Playing
    }

    /// Volume the player was prepared with (0.0 to 1.0).
    fn volume(&self) -> f32;
}

/// Native audio engine used by the dispatcher.
///
/// # Example
///
/// ```
/// use jbits::audio::{AudioAsset, AudioBackend, AudioHandle, SessionConfig, SimulatedBackend};
///
/// let mut backend = SimulatedBackend::with_resources(["ding.caf"]);
/// backend.configure_session(&SessionConfig::default()).unwrap();
///
/// let mut player = backend.prepare(&AudioAsset::new("ding", "caf", 0.5)).unwrap();
/// player.play_from_start().unwrap();
/// assert!(player.is_playing());
/// ```
pub trait AudioBackend: Send {
    /// Configure and activate the shared audio session.
    fn configure_session(&mut self, config: &SessionConfig) -> Result<()>;

    /// Prepare a player for `asset`, configured with the asset's volume.
    ///
    /// Returns [`JbitsError::ResourceMissing`](crate::JbitsError::ResourceMissing)
    /// when the asset cannot be located, and any other error when the located
    /// resource cannot be turned into a player.
    fn prepare(&mut self, asset: &AudioAsset) -> Result<Box<dyn AudioHandle>>;
}
