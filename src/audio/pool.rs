//! Prepared player pool

use super::asset::AudioAsset;
use super::backend::{AudioBackend, AudioHandle, PlaybackState};
use super::LOG_TARGET;
use crate::JbitsError;
use std::collections::HashMap;

/// What a refresh pass left in the pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Identities now in the pool, in preparation order
    pub prepared: Vec<String>,
    /// Identities whose resource could not be located
    pub missing: Vec<String>,
    /// Identities whose resource was found but whose player failed to initialise
    pub failed: Vec<String>,
    /// The provider listed no assets (misconfiguration)
    pub empty_request: bool,
}

impl RefreshSummary {
    /// Check if every requested asset made it into the pool
    pub fn is_complete(&self) -> bool {
        !self.empty_request && self.missing.is_empty() && self.failed.is_empty()
    }
}

/// One prepared player per asset identity.
///
/// The pool is rebuilt wholesale by [`refresh`](PlayerPool::refresh); entries
/// are never patched individually.
#[derive(Default)]
pub struct PlayerPool {
    players: HashMap<String, Box<dyn AudioHandle>>,
}

impl PlayerPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all players, then prepare one per asset plus the fallback.
    ///
    /// Individual failures never abort the batch: the asset is logged and left
    /// out of the pool. An empty asset list is reported as a configuration
    /// warning and leaves the pool empty.
    pub fn refresh(
        &mut self,
        backend: &mut dyn AudioBackend,
        assets: &[AudioAsset],
        fallback: Option<&AudioAsset>,
    ) -> RefreshSummary {
        self.players.clear();
        let mut summary = RefreshSummary::default();

        if assets.is_empty() {
            log::warn!(target: LOG_TARGET, "There are no assets to set up; check the asset provider");
            summary.empty_request = true;
            return summary;
        }

        for asset in assets.iter().chain(fallback) {
            self.prepare_asset(backend, asset, &mut summary);
        }

        log::info!(
            target: LOG_TARGET,
            "Prepared {} audio player(s), {} missing, {} failed",
            self.players.len(),
            summary.missing.len(),
            summary.failed.len()
        );
        summary
    }

    fn prepare_asset(
        &mut self,
        backend: &mut dyn AudioBackend,
        asset: &AudioAsset,
        summary: &mut RefreshSummary,
    ) {
        let identity = asset.identity();
        match backend.prepare(asset) {
            Ok(player) => {
                if self.players.insert(identity.clone(), player).is_none() {
                    summary.prepared.push(identity);
                } else {
                    log::debug!(target: LOG_TARGET, "Replaced duplicate audio asset \"{identity}\"");
                }
            }
            Err(JbitsError::ResourceMissing(reason)) => {
                log::debug!(target: LOG_TARGET, "Skipping \"{identity}\": {reason}");
                summary.missing.push(identity);
            }
            Err(err) => {
                log::error!(target: LOG_TARGET, "Failed to prepare audio \"{identity}\": {err}");
                summary.failed.push(identity);
            }
        }
    }

    /// Player for `identity`
    pub fn get_mut(&mut self, identity: &str) -> Option<&mut (dyn AudioHandle + 'static)> {
        self.players.get_mut(identity).map(|player| player.as_mut())
    }

    /// Playback state for `identity`, if it is in the pool
    pub fn state(&self, identity: &str) -> Option<PlaybackState> {
        self.players.get(identity).map(|player| player.state())
    }

    /// Check if `identity` is in the pool
    pub fn contains(&self, identity: &str) -> bool {
        self.players.contains_key(identity)
    }

    /// Sorted identities in the pool
    pub fn identities(&self) -> Vec<String> {
        let mut identities: Vec<String> = self.players.keys().cloned().collect();
        identities.sort();
        identities
    }

    /// Number of prepared players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Drop every player
    pub fn clear(&mut self) {
        self.players.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SimulatedBackend;

    fn ding() -> AudioAsset {
        AudioAsset::new("ding", "caf", 0.5)
    }

    fn click() -> AudioAsset {
        AudioAsset::new("click", "caf", 1.0)
    }

    fn tick() -> AudioAsset {
        AudioAsset::new("tick", "caf", 0.3)
    }

    #[test]
    fn test_refresh_prepares_assets_and_fallback() {
        let mut backend = SimulatedBackend::with_resources(["ding.caf", "click.caf", "tick.caf"]);
        let mut pool = PlayerPool::new();

        let summary = pool.refresh(&mut backend, &[ding(), click()], Some(&tick()));

        assert!(summary.is_complete());
        assert_eq!(summary.prepared, vec!["ding.caf", "click.caf", "tick.caf"]);
        assert_eq!(pool.identities(), vec!["click.caf", "ding.caf", "tick.caf"]);
        assert_eq!(pool.state("ding.caf"), Some(PlaybackState::Idle));
    }

    #[test]
    fn test_refresh_with_empty_list_leaves_pool_empty() {
        let mut backend = SimulatedBackend::with_resources(["ding.caf", "tick.caf"]);
        let mut pool = PlayerPool::new();
        pool.refresh(&mut backend, &[ding()], None);
        assert_eq!(pool.len(), 1);

        let summary = pool.refresh(&mut backend, &[], Some(&tick()));

        assert!(summary.empty_request);
        assert!(!summary.is_complete());
        assert!(pool.is_empty(), "Empty request should leave the pool empty");
    }

    #[test]
    fn test_refresh_omits_missing_and_broken_assets() {
        let mut backend = SimulatedBackend::with_resources(["ding.caf"]);
        backend.break_resource("tick.caf");
        let mut pool = PlayerPool::new();

        let summary = pool.refresh(&mut backend, &[ding(), click()], Some(&tick()));

        assert_eq!(summary.prepared, vec!["ding.caf"]);
        assert_eq!(summary.missing, vec!["click.caf"]);
        assert_eq!(summary.failed, vec!["tick.caf"]);
        assert!(pool.contains("ding.caf"));
        assert!(!pool.contains("click.caf"));
        assert!(!pool.contains("tick.caf"));
    }

    #[test]
    fn test_refresh_replaces_previous_entries() {
        let mut backend = SimulatedBackend::with_resources(["ding.caf", "click.caf"]);
        let mut pool = PlayerPool::new();
        pool.refresh(&mut backend, &[ding(), click()], None);

        backend.remove_resource("click.caf");
        pool.refresh(&mut backend, &[ding(), click()], None);

        assert_eq!(pool.identities(), vec!["ding.caf"]);
    }

    #[test]
    fn test_duplicate_identity_is_prepared_once_in_summary() {
        let mut backend = SimulatedBackend::with_resources(["ding.caf"]);
        let mut pool = PlayerPool::new();

        let summary = pool.refresh(&mut backend, &[ding()], Some(&ding()));

        assert_eq!(summary.prepared, vec!["ding.caf"]);
        assert_eq!(pool.len(), 1);
    }
}
