//! Sound-effect playback
//!
//! Data flows from the [`AssetProvider`] into the [`PlayerPool`] (one prepared
//! player per asset) and from there through the [`AudioDispatcher`], which
//! resolves each play request against the provider's current mute flag and
//! fallback choice.
//!
//! The native audio engine sits behind the [`AudioBackend`] / [`AudioHandle`]
//! traits. [`SimulatedBackend`] is a headless implementation with observable
//! players; `RodioBackend` (feature `rodio-backend`) plays through the system
//! output device.

pub mod asset;
pub mod backend;
pub mod bundle;
pub mod dispatcher;
pub mod events;
pub mod pool;
pub mod provider;
#[cfg(feature = "rodio-backend")]
pub mod rodio_backend;
pub mod session;
pub mod simulated;

pub use asset::AudioAsset;
pub use backend::{AudioBackend, AudioHandle, PlaybackState};
pub use bundle::ResourceBundle;
pub use dispatcher::{AudioDispatcher, PlayOutcome};
pub use events::{play_request_channel, PlayRequest, PlayRequestReceiver, PlayRequestSender};
pub use pool::{PlayerPool, RefreshSummary};
pub use provider::{AssetProvider, ProviderLink, StaticAssetProvider};
#[cfg(feature = "rodio-backend")]
pub use rodio_backend::RodioBackend;
pub use session::{initialize_session, SessionCategory, SessionConfig, SessionState};
pub use simulated::SimulatedBackend;

/// Log target used by every audio component
pub(crate) const LOG_TARGET: &str = "jbits::audio";
