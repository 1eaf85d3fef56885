//! Integration tests for sound-effect dispatch
//!
//! These tests drive the dispatcher through the public API with a simulated
//! backend, covering preload, fallback substitution, muting and the typed
//! request channel.

use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use jbits::audio::{
    play_request_channel, AssetProvider, AudioAsset, AudioDispatcher, PlayOutcome, PlaybackState,
    SimulatedBackend, StaticAssetProvider,
};
use jbits::JbitsError;

fn ding() -> AudioAsset {
    AudioAsset::new("ding", "caf", 0.5)
}

fn click() -> AudioAsset {
    AudioAsset::new("click", "caf", 1.0)
}

fn tick() -> AudioAsset {
    AudioAsset::new("tick", "caf", 0.3)
}

/// Provider modelled on an app screen: the sound list is an enum-like table
struct GameScreen {
    muted: bool,
}

impl AssetProvider for GameScreen {
    fn audio_assets(&self) -> Vec<AudioAsset> {
        vec![ding(), click()]
    }

    fn is_audio_muted(&self) -> bool {
        self.muted
    }

    fn fallback_audio_asset(&self) -> Option<AudioAsset> {
        Some(tick())
    }
}

#[test]
fn test_ding_click_tick_scenario() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "click.caf", "tick.caf"]);
    let observer = backend.clone();
    let dispatcher = AudioDispatcher::new(backend);

    let screen = Arc::new(GameScreen { muted: false });
    dispatcher.assign_provider(&screen);
    let summary = dispatcher.refresh_audio_assets().unwrap();
    assert!(summary.is_complete(), "All three sounds should preload: {summary:?}");

    assert_relative_eq!(observer.prepared_volume("ding.caf").unwrap(), 0.5);
    assert_relative_eq!(observer.prepared_volume("click.caf").unwrap(), 1.0);
    assert_relative_eq!(observer.prepared_volume("tick.caf").unwrap(), 0.3);

    // ding plays
    let first = dispatcher.request_play(&ding()).unwrap();
    assert!(matches!(first, PlayOutcome::Played { ref identity } if identity == "ding.caf"));

    // ding again before it finishes: tick plays, ding keeps playing
    let second = dispatcher.request_play(&ding()).unwrap();
    assert!(matches!(second, PlayOutcome::PlayedFallback { .. }));
    assert!(observer.is_playing("ding.caf"));
    assert!(observer.is_playing("tick.caf"));
    assert_eq!(observer.start_count("ding.caf"), 1);

    // click plays
    let third = dispatcher.request_play(&click()).unwrap();
    assert!(third.started_playback());
    assert_eq!(observer.playing(), vec!["click.caf", "ding.caf", "tick.caf"]);
}

#[test]
fn test_assets_loaded_from_json_prepare_with_clamped_volume() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "click.caf"]);
    let observer = backend.clone();
    let dispatcher = AudioDispatcher::new(backend);

    let assets: Vec<AudioAsset> = serde_json::from_str(
        r#"[
            { "name": "ding", "file_extension": "caf", "volume": 5.0 },
            { "name": "click", "file_extension": "caf", "volume": -1.0 }
        ]"#,
    )
    .unwrap();
    let provider = Arc::new(StaticAssetProvider::new(assets));
    dispatcher.assign_provider(&provider);
    dispatcher.refresh_audio_assets().unwrap();

    assert_relative_eq!(observer.prepared_volume("ding.caf").unwrap(), 1.0);
    assert_relative_eq!(observer.prepared_volume("click.caf").unwrap(), 0.0);
}

#[test]
fn test_muted_provider_never_starts_a_player() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "click.caf", "tick.caf"]);
    let observer = backend.clone();
    let dispatcher = AudioDispatcher::new(backend);
    let screen = Arc::new(GameScreen { muted: true });
    dispatcher.assign_provider(&screen);
    dispatcher.refresh_audio_assets().unwrap();

    for asset in [ding(), click(), tick(), ding()] {
        assert_eq!(dispatcher.request_play(&asset).unwrap(), PlayOutcome::Muted);
    }
    assert!(observer.playing().is_empty());
}

#[test]
fn test_refresh_keeps_resolvable_assets_only() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "tick.caf"]);
    let dispatcher = AudioDispatcher::new(backend);
    let screen = Arc::new(GameScreen { muted: false });
    dispatcher.assign_provider(&screen);

    let summary = dispatcher.refresh_audio_assets().unwrap();

    assert_eq!(summary.missing, vec!["click.caf"]);
    assert_eq!(dispatcher.prepared_identities(), vec!["ding.caf", "tick.caf"]);
    assert_eq!(
        dispatcher.request_play(&click()).unwrap(),
        PlayOutcome::Missing {
            identity: "click.caf".into()
        }
    );
}

#[test]
fn test_empty_provider_is_a_warning_not_a_crash() {
    let dispatcher = AudioDispatcher::new(SimulatedBackend::with_resources(["tick.caf"]));
    let provider = Arc::new(StaticAssetProvider::new(Vec::new()).with_fallback(tick()));
    dispatcher.assign_provider(&provider);

    let summary = dispatcher.refresh_audio_assets().unwrap();

    assert!(summary.empty_request);
    assert!(dispatcher.prepared_identities().is_empty());
}

#[test]
fn test_refresh_rebuilds_pool_with_new_provider_state() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "click.caf", "tick.caf"]);
    let observer = backend.clone();
    let dispatcher = AudioDispatcher::new(backend);
    let provider = Arc::new(StaticAssetProvider::new(vec![ding()]));
    dispatcher.assign_provider(&provider);
    dispatcher.refresh_audio_assets().unwrap();
    dispatcher.request_play(&ding()).unwrap();

    provider.set_fallback(Some(tick()));
    dispatcher.refresh_audio_assets().unwrap();

    assert_eq!(dispatcher.prepared_identities(), vec!["ding.caf", "tick.caf"]);
    assert_eq!(
        dispatcher.player_state(&ding()),
        Some(PlaybackState::Idle),
        "Refresh should replace players, not carry their state over"
    );
    assert_eq!(observer.prepare_count(), 3);
}

#[test]
fn test_provider_replacement_and_detach() {
    let dispatcher = AudioDispatcher::new(SimulatedBackend::with_resources(["ding.caf"]));
    let first = Arc::new(StaticAssetProvider::new(vec![ding()]));
    let second = Arc::new(StaticAssetProvider::new(vec![ding()]));
    second.set_muted(true);

    dispatcher.assign_provider(&first);
    dispatcher.refresh_audio_assets().unwrap();
    dispatcher.assign_provider(&second);
    assert_eq!(dispatcher.request_play(&ding()).unwrap(), PlayOutcome::Muted);

    dispatcher.detach_provider();
    assert!(matches!(
        dispatcher.request_play(&ding()),
        Err(JbitsError::Configuration(_))
    ));
}

#[test]
fn test_listener_thread_processes_every_request() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "click.caf", "tick.caf"]);
    let observer = backend.clone();
    let dispatcher = Arc::new(AudioDispatcher::new(backend));
    let screen = Arc::new(GameScreen { muted: false });
    dispatcher.assign_provider(&screen);
    dispatcher.refresh_audio_assets().unwrap();

    let (sender, receiver) = play_request_channel();
    let worker = {
        let dispatcher = Arc::clone(&dispatcher);
        thread::spawn(move || dispatcher.listen(receiver))
    };

    let producers: Vec<_> = (0..4)
        .map(|i| {
            let sender = sender.clone();
            thread::spawn(move || {
                let asset = if i % 2 == 0 { ding() } else { click() };
                assert!(sender.play(asset));
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    drop(sender);

    assert_eq!(worker.join().unwrap(), 4);
    assert!(observer.is_playing("ding.caf"));
    assert!(observer.is_playing("click.caf"));
    // Two requests per sound: one start, one fallback substitution each at most
    assert_eq!(observer.start_count("ding.caf"), 1);
    assert_eq!(observer.start_count("click.caf"), 1);
    assert_eq!(observer.start_count("tick.caf"), 1);
}

#[test]
fn test_concurrent_requests_and_refreshes() {
    let backend = SimulatedBackend::with_resources(["ding.caf", "click.caf", "tick.caf"]);
    let dispatcher = Arc::new(AudioDispatcher::new(backend));
    let screen = Arc::new(GameScreen { muted: false });
    dispatcher.assign_provider(&screen);
    dispatcher.refresh_audio_assets().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            thread::spawn(move || {
                for _ in 0..50 {
                    if i == 0 {
                        dispatcher.refresh_audio_assets().unwrap();
                    } else {
                        dispatcher.request_play(&ding()).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        dispatcher.prepared_identities(),
        vec!["click.caf", "ding.caf", "tick.caf"]
    );
}
