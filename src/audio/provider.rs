//! Asset providers
//!
//! A provider is owned by the app (a screen, a settings object). The dispatcher
//! only keeps a non-owning [`ProviderLink`] and reads the provider fresh on every
//! request, so mute and fallback changes apply immediately.

use super::asset::AudioAsset;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Supplies the sounds to preload, the mute flag and the fallback sound.
pub trait AssetProvider: Send + Sync {
    /// Assets to prepare on refresh
    fn audio_assets(&self) -> Vec<AudioAsset>;

    /// When true, play requests are ignored
    fn is_audio_muted(&self) -> bool;

    /// Played instead of a requested asset that is still playing.
    ///
    /// Works best with a very short sound.
    fn fallback_audio_asset(&self) -> Option<AudioAsset> {
        None
    }
}

/// Non-owning reference to an [`AssetProvider`].
///
/// A provider that has been dropped reads as absent, exactly like one that was
/// never assigned.
#[derive(Default, Clone)]
pub struct ProviderLink {
    provider: Option<Weak<dyn AssetProvider>>,
}

impl ProviderLink {
    /// Link to `provider` without keeping it alive
    pub fn new<P: AssetProvider + 'static>(provider: &Arc<P>) -> Self {
        let provider: Arc<dyn AssetProvider> = provider.clone();
        Self {
            provider: Some(Arc::downgrade(&provider)),
        }
    }

    /// The provider, if assigned and still alive
    pub fn get(&self) -> Option<Arc<dyn AssetProvider>> {
        self.provider.as_ref().and_then(Weak::upgrade)
    }

    /// Check if a live provider is attached
    pub fn is_attached(&self) -> bool {
        self.get().is_some()
    }
}

/// Provider with a fixed asset list and a switchable mute flag and fallback.
#[derive(Debug, Default)]
pub struct StaticAssetProvider {
    assets: Vec<AudioAsset>,
    muted: AtomicBool,
    fallback: RwLock<Option<AudioAsset>>,
}

impl StaticAssetProvider {
    /// Create an unmuted provider without fallback
    pub fn new(assets: Vec<AudioAsset>) -> Self {
        Self {
            assets,
            muted: AtomicBool::new(false),
            fallback: RwLock::new(None),
        }
    }

    /// Set the fallback sound
    pub fn with_fallback(self, fallback: AudioAsset) -> Self {
        *self.fallback.write() = Some(fallback);
        self
    }

    /// Mute or unmute
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    /// Replace or clear the fallback sound
    pub fn set_fallback(&self, fallback: Option<AudioAsset>) {
        *self.fallback.write() = fallback;
    }
}

impl AssetProvider for StaticAssetProvider {
    fn audio_assets(&self) -> Vec<AudioAsset> {
        self.assets.clone()
    }

    fn is_audio_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn fallback_audio_asset(&self) -> Option<AudioAsset> {
        self.fallback.read().clone()
    }
}
