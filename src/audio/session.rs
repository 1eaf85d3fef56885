//! Shared audio session setup

use super::backend::AudioBackend;
use super::LOG_TARGET;
use serde::{Deserialize, Serialize};

/// How the app's sounds relate to audio from other apps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    /// Incidental sounds that respect the silent switch and mix with other audio
    #[default]
    Ambient,
    /// Like `Ambient`, but silences other apps' audio
    SoloAmbient,
    /// Primary audio that keeps playing when the device is silenced
    Playback,
}

/// Session parameters applied once when a dispatcher is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Session category
    pub category: SessionCategory,
    /// Whether our sounds mix with audio from other apps
    pub mix_with_others: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            category: SessionCategory::Ambient,
            mix_with_others: true,
        }
    }
}

/// Outcome of session setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Session active, playback possible
    Active,
    /// Session could not be activated; every play request is a silent no-op
    Unavailable(String),
}

impl SessionState {
    /// Check if the session is active
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }
}

/// Configure the shared session on `backend`.
///
/// Never fails: an activation error is logged and reported as
/// [`SessionState::Unavailable`], leaving the app soundless.
pub fn initialize_session(backend: &mut dyn AudioBackend, config: &SessionConfig) -> SessionState {
    match backend.configure_session(config) {
        Ok(()) => {
            log::debug!(
                target: LOG_TARGET,
                "Audio session active ({:?}, mix_with_others={})",
                config.category,
                config.mix_with_others
            );
            SessionState::Active
        }
        Err(err) => {
            log::warn!(
                target: LOG_TARGET,
                "Failed to set up the audio session, sounds are disabled: {err}"
            );
            SessionState::Unavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SimulatedBackend;

    #[test]
    fn test_default_session_is_mixable_ambient() {
        let config = SessionConfig::default();
        assert_eq!(config.category, SessionCategory::Ambient);
        assert!(config.mix_with_others);
    }

    #[test]
    fn test_initialize_session_active() {
        let mut backend = SimulatedBackend::new();
        let state = initialize_session(&mut backend, &SessionConfig::default());
        assert!(state.is_active());
        assert_eq!(backend.configured_session(), Some(SessionConfig::default()));
    }

    #[test]
    fn test_initialize_session_failure_degrades() {
        let mut backend = SimulatedBackend::new().with_failing_session();
        let state = initialize_session(&mut backend, &SessionConfig::default());
        assert!(
            matches!(state, SessionState::Unavailable(_)),
            "Session failure should be reported, not propagated"
        );
        assert!(!state.is_active());
    }

    #[test]
    fn test_session_config_from_json() {
        let config: SessionConfig =
            serde_json::from_str(r#"{ "category": "solo_ambient" }"#).unwrap();
        assert_eq!(config.category, SessionCategory::SoloAmbient);
        assert!(config.mix_with_others, "Missing fields should use defaults");
    }
}
