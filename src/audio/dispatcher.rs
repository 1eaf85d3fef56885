//! Playback dispatcher
//!
//! Each request is resolved against the provider's current state:
//!
//! 1. Without a live provider the request fails with a configuration error.
//! 2. A muted provider turns the request into a no-op.
//! 3. An asset missing from the pool is a no-op (already logged at refresh).
//! 4. An asset that is still playing is replaced by the fallback asset, once.
//! 5. Otherwise the asset restarts from the beginning.
//!
//! Requests are never queued. If the audio session could not be activated the
//! dispatcher stays usable, but every request is a silent no-op.

use super::asset::AudioAsset;
use super::backend::{AudioBackend, PlaybackState};
use super::events::PlayRequestReceiver;
use super::pool::{PlayerPool, RefreshSummary};
use super::provider::{AssetProvider, ProviderLink};
use super::session::{initialize_session, SessionConfig, SessionState};
use super::LOG_TARGET;
use crate::logging::LogCategory;
use crate::{JbitsError, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Result of a single play request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The requested asset started from the beginning
    Played {
        /// Identity of the asset that started
        identity: String,
    },
    /// The requested asset was busy; the fallback started instead
    PlayedFallback {
        /// Identity of the busy asset
        requested: String,
        /// Identity of the fallback that started
        fallback: String,
    },
    /// The requested asset was busy and no fallback could be played
    Busy {
        /// Identity of the busy asset
        identity: String,
    },
    /// The provider is muted
    Muted,
    /// The asset (or the fallback it needed) is not in the pool
    Missing {
        /// Identity that was looked up
        identity: String,
    },
    /// The player refused to start
    Failed {
        /// Identity of the player that failed
        identity: String,
    },
    /// The audio session is unavailable; nothing plays
    SessionUnavailable,
}

impl PlayOutcome {
    /// Check if a player started because of this request
    pub fn started_playback(&self) -> bool {
        matches!(
            self,
            PlayOutcome::Played { .. } | PlayOutcome::PlayedFallback { .. }
        )
    }
}

/// Plays sound effects from a prepared pool on behalf of an [`AssetProvider`].
///
/// The dispatcher is `Send + Sync`; pool lookups and refreshes are serialized
/// by an internal lock, so a request never observes a half-built pool.
pub struct AudioDispatcher {
    backend: Mutex<Box<dyn AudioBackend>>,
    pool: Mutex<PlayerPool>,
    provider: RwLock<ProviderLink>,
    session: SessionState,
}

impl AudioDispatcher {
    /// Create a dispatcher with the default ambient, mixable session
    pub fn new(backend: impl AudioBackend + 'static) -> Self {
        Self::with_session(backend, SessionConfig::default())
    }

    /// Create a dispatcher, configuring the session once with `config`
    pub fn with_session(backend: impl AudioBackend + 'static, config: SessionConfig) -> Self {
        let mut backend: Box<dyn AudioBackend> = Box::new(backend);
        let session = initialize_session(&mut *backend, &config);
        Self {
            backend: Mutex::new(backend),
            pool: Mutex::new(PlayerPool::new()),
            provider: RwLock::new(ProviderLink::default()),
            session,
        }
    }

    /// Attach the provider consulted on every request.
    ///
    /// Only a weak reference is kept: the caller owns the provider, and once it
    /// is dropped the dispatcher behaves as if none was assigned.
    pub fn assign_provider<P: AssetProvider + 'static>(&self, provider: &Arc<P>) {
        *self.provider.write() = ProviderLink::new(provider);
    }

    /// Detach the current provider
    pub fn detach_provider(&self) {
        *self.provider.write() = ProviderLink::default();
    }

    /// Check if a live provider is attached
    pub fn has_provider(&self) -> bool {
        self.provider.read().is_attached()
    }

    /// Session state decided at construction
    pub fn session_state(&self) -> &SessionState {
        &self.session
    }

    fn current_provider(&self) -> Result<Arc<dyn AssetProvider>> {
        self.provider.read().get().ok_or_else(|| {
            JbitsError::Configuration("No asset provider defined for AudioDispatcher".into())
        })
    }

    /// Rebuild the pool from the provider's assets and fallback.
    pub fn refresh_audio_assets(&self) -> Result<RefreshSummary> {
        let provider = self.current_provider().map_err(|err| {
            log::warn!(target: LOG_TARGET, "Cannot refresh audio assets: {err}");
            err
        })?;

        let assets = provider.audio_assets();
        let fallback = provider.fallback_audio_asset();

        let mut backend = self.backend.lock();
        let mut pool = self.pool.lock();
        Ok(pool.refresh(&mut **backend, &assets, fallback.as_ref()))
    }

    /// Play `asset`, or the fallback if `asset` is still playing.
    ///
    /// Only a missing provider is reported as an error; everything else is
    /// best effort and described by the returned [`PlayOutcome`].
    pub fn request_play(&self, asset: &AudioAsset) -> Result<PlayOutcome> {
        if !self.session.is_active() {
            log::debug!(target: LOG_TARGET, "Audio session unavailable, ignoring \"{asset}\"");
            return Ok(PlayOutcome::SessionUnavailable);
        }

        let provider = self.current_provider().map_err(|err| {
            log::warn!(target: LOG_TARGET, "Cannot play \"{asset}\": {err}");
            err
        })?;

        if provider.is_audio_muted() {
            LogCategory::Info.log(LOG_TARGET, "Sounds are muted, bailing.");
            return Ok(PlayOutcome::Muted);
        }
        // Read before locking the pool: providers may call back into the dispatcher
        let fallback = provider.fallback_audio_asset();

        let identity = asset.identity();
        let mut pool = self.pool.lock();

        match pool.state(&identity) {
            None => {
                log::debug!(target: LOG_TARGET, "No prepared player for \"{identity}\"");
                Ok(PlayOutcome::Missing { identity })
            }
            Some(PlaybackState::Playing) => {
                let Some(fallback) = fallback else {
                    return Ok(PlayOutcome::Busy { identity });
                };
                Ok(Self::play_fallback(&mut pool, identity, &fallback))
            }
            Some(PlaybackState::Idle) => Ok(Self::start(&mut pool, identity)),
        }
    }

    fn play_fallback(pool: &mut PlayerPool, requested: String, fallback: &AudioAsset) -> PlayOutcome {
        let fallback = fallback.identity();
        match pool.state(&fallback) {
            None => {
                log::debug!(target: LOG_TARGET, "Fallback \"{fallback}\" is not prepared");
                PlayOutcome::Missing { identity: fallback }
            }
            // The fallback is only ever substituted once per request
            Some(PlaybackState::Playing) => PlayOutcome::Busy {
                identity: requested,
            },
            Some(PlaybackState::Idle) => match Self::start(pool, fallback.clone()) {
                PlayOutcome::Played { .. } => {
                    LogCategory::Info.log(
                        LOG_TARGET,
                        &format!("🎵 Requested player \"{requested}\" still playing, playing fallback sound.."),
                    );
                    PlayOutcome::PlayedFallback {
                        requested,
                        fallback,
                    }
                }
                other => other,
            },
        }
    }

    fn start(pool: &mut PlayerPool, identity: String) -> PlayOutcome {
        let Some(player) = pool.get_mut(&identity) else {
            return PlayOutcome::Missing { identity };
        };
        match player.play_from_start() {
            Ok(()) => {
                LogCategory::Info.log(LOG_TARGET, &format!("🎵 Playing \"{identity}\".."));
                PlayOutcome::Played { identity }
            }
            Err(err) => {
                LogCategory::Fault.log(LOG_TARGET, &format!("Failed to play \"{identity}\": {err}"));
                PlayOutcome::Failed { identity }
            }
        }
    }

    /// Dispatch every pending request without blocking.
    ///
    /// Returns the number of requests processed. Configuration errors are
    /// logged per request.
    pub fn drain_requests(&self, requests: &PlayRequestReceiver) -> usize {
        let mut processed = 0;
        for request in requests.try_iter() {
            let _ = self.request_play(&request.asset);
            processed += 1;
        }
        processed
    }

    /// Dispatch requests until every sender has been dropped.
    ///
    /// Blocks the calling thread; run it on a dedicated worker.
    pub fn listen(&self, requests: PlayRequestReceiver) -> usize {
        let mut processed = 0;
        for request in requests.iter() {
            let _ = self.request_play(&request.asset);
            processed += 1;
        }
        log::debug!(target: LOG_TARGET, "Play request channel closed after {processed} request(s)");
        processed
    }

    /// Sorted identities currently in the pool
    pub fn prepared_identities(&self) -> Vec<String> {
        self.pool.lock().identities()
    }

    /// Playback state of a pooled asset
    pub fn player_state(&self, asset: &AudioAsset) -> Option<PlaybackState> {
        self.pool.lock().state(&asset.identity())
    }
}
