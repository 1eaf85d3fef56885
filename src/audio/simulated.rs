//! Headless audio backend
//!
//! Behaves like a native engine without producing sound: resources are a set of
//! known identities, players stay `Playing` until [`SimulatedBackend::finish`]
//! is called. Clones share state, so a clone kept outside the dispatcher can
//! observe and drive every player the dispatcher prepared.

use super::asset::AudioAsset;
use super::backend::{AudioBackend, AudioHandle, PlaybackState};
use super::session::SessionConfig;
use crate::{JbitsError, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Default)]
struct SimulatedPlayer {
    state: PlaybackState,
    volume: f32,
    starts: usize,
    generation: u64,
}

#[derive(Debug, Default)]
struct SimulatedState {
    resources: HashSet<String>,
    broken: HashSet<String>,
    failing_session: bool,
    session: Option<SessionConfig>,
    players: HashMap<String, SimulatedPlayer>,
    generation: u64,
}

/// Audio backend with observable, manually finished players.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    shared: Arc<Mutex<SimulatedState>>,
}

impl SimulatedBackend {
    /// Backend without any resources
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend where the given `name.ext` identities can be located
    pub fn with_resources<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = Self::new();
        for identity in identities {
            backend.add_resource(identity);
        }
        backend
    }

    /// Make session activation fail
    pub fn with_failing_session(self) -> Self {
        self.shared.lock().failing_session = true;
        self
    }

    /// Make an identity locatable
    pub fn add_resource(&self, identity: impl Into<String>) {
        self.shared.lock().resources.insert(identity.into());
    }

    /// Make an identity unlocatable again
    pub fn remove_resource(&self, identity: &str) {
        self.shared.lock().resources.remove(identity);
    }

    /// Resource exists, but the player fails to initialise from it
    pub fn break_resource(&self, identity: impl Into<String>) {
        let identity = identity.into();
        let mut state = self.shared.lock();
        state.resources.insert(identity.clone());
        state.broken.insert(identity);
    }

    /// Session configuration applied, if activation succeeded
    pub fn configured_session(&self) -> Option<SessionConfig> {
        self.shared.lock().session
    }

    /// State of the most recently prepared player for `identity`
    pub fn state(&self, identity: &str) -> Option<PlaybackState> {
        self.shared.lock().players.get(identity).map(|p| p.state)
    }

    /// Check if the player for `identity` is playing
    pub fn is_playing(&self, identity: &str) -> bool {
        self.state(identity) == Some(PlaybackState::Playing)
    }

    /// Identities whose players are currently playing, sorted
    pub fn playing(&self) -> Vec<String> {
        let state = self.shared.lock();
        let mut playing: Vec<String> = state
            .players
            .iter()
            .filter(|(_, p)| p.state == PlaybackState::Playing)
            .map(|(id, _)| id.clone())
            .collect();
        playing.sort();
        playing
    }

    /// How many times the player for `identity` was started
    pub fn start_count(&self, identity: &str) -> usize {
        self.shared
            .lock()
            .players
            .get(identity)
            .map_or(0, |p| p.starts)
    }

    /// Volume the player for `identity` was prepared with
    pub fn prepared_volume(&self, identity: &str) -> Option<f32> {
        self.shared.lock().players.get(identity).map(|p| p.volume)
    }

    /// Number of players prepared over the backend's lifetime
    pub fn prepare_count(&self) -> u64 {
        self.shared.lock().generation
    }

    /// Let the player for `identity` reach the end of its sound
    pub fn finish(&self, identity: &str) {
        if let Some(player) = self.shared.lock().players.get_mut(identity) {
            player.state = PlaybackState::Idle;
        }
    }

    /// Let every player reach the end of its sound
    pub fn finish_all(&self) {
        for player in self.shared.lock().players.values_mut() {
            player.state = PlaybackState::Idle;
        }
    }
}

impl AudioBackend for SimulatedBackend {
    fn configure_session(&mut self, config: &SessionConfig) -> Result<()> {
        let mut state = self.shared.lock();
        if state.failing_session {
            return Err(JbitsError::SessionUnavailable(
                "simulated session activation failure".into(),
            ));
        }
        state.session = Some(*config);
        Ok(())
    }

    fn prepare(&mut self, asset: &AudioAsset) -> Result<Box<dyn AudioHandle>> {
        let identity = asset.identity();
        let mut state = self.shared.lock();
        if !state.resources.contains(&identity) {
            return Err(JbitsError::ResourceMissing(identity));
        }
        if state.broken.contains(&identity) {
            return Err(JbitsError::AudioDevice(format!(
                "cannot decode {identity}"
            )));
        }

        state.generation += 1;
        let generation = state.generation;
        state.players.insert(
            identity.clone(),
            SimulatedPlayer {
                state: PlaybackState::Idle,
                volume: asset.volume(),
                starts: 0,
                generation,
            },
        );

        Ok(Box::new(SimulatedHandle {
            shared: Arc::clone(&self.shared),
            identity,
            generation,
            volume: asset.volume(),
        }))
    }
}

/// Player handed out by [`SimulatedBackend`]
struct SimulatedHandle {
    shared: Arc<Mutex<SimulatedState>>,
    identity: String,
    generation: u64,
    volume: f32,
}

impl AudioHandle for SimulatedHandle {
    fn play_from_start(&mut self) -> Result<()> {
        let mut state = self.shared.lock();
        match state.players.get_mut(&self.identity) {
            Some(player) if player.generation == self.generation => {
                player.state = PlaybackState::Playing;
                player.starts += 1;
                Ok(())
            }
            _ => Err(JbitsError::AudioDevice(format!(
                "player for {} was replaced",
                self.identity
            ))),
        }
    }

    fn state(&self) -> PlaybackState {
        let state = self.shared.lock();
        match state.players.get(&self.identity) {
            Some(player) if player.generation == self.generation => player.state,
            _ => PlaybackState::Idle,
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}
