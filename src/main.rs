#[cfg(not(feature = "rodio-backend"))]
fn main() {
    eprintln!(
        "The jbits-play CLI requires the \"rodio-backend\" feature. Rebuild with `--features rodio-backend` to enable playback."
    );
}

#[cfg(feature = "rodio-backend")]
mod cli {
    use std::env;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use jbits::audio::{
        AudioAsset, AudioDispatcher, PlaybackState, ResourceBundle, RodioBackend,
        StaticAssetProvider,
    };
    use jbits::{init_logging, AudioConfig};

    const DEFAULT_EXTENSION: &str = "wav";
    const POLL_INTERVAL: Duration = Duration::from_millis(20);

    struct Args {
        config: AudioConfig,
        files: Vec<String>,
        volume: f32,
    }

    fn usage() -> String {
        "usage: jbits-play [--config audio.json | --dir <resource-dir>] [--volume 0.0-1.0] <name.ext>..."
            .to_string()
    }

    fn parse_args() -> Result<Args, String> {
        let mut config = AudioConfig::default();
        let mut files = Vec::new();
        let mut volume = 1.0;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().ok_or_else(usage)?;
                    config = AudioConfig::from_json_file(&path).map_err(|e| e.to_string())?;
                }
                "--dir" => {
                    config.resource_root = PathBuf::from(args.next().ok_or_else(usage)?);
                }
                "--volume" => {
                    let value = args.next().ok_or_else(usage)?;
                    volume = value
                        .parse()
                        .map_err(|_| format!("invalid volume \"{value}\""))?;
                }
                "-h" | "--help" => return Err(usage()),
                _ => files.push(arg),
            }
        }

        if files.is_empty() {
            return Err(usage());
        }
        Ok(Args {
            config,
            files,
            volume,
        })
    }

    pub fn run() -> Result<(), String> {
        init_logging();
        let args = parse_args()?;

        let assets: Vec<AudioAsset> = args
            .files
            .iter()
            .map(|file| AudioAsset::from_file_name(file, DEFAULT_EXTENSION, args.volume))
            .collect();

        let backend = RodioBackend::new(ResourceBundle::new(&args.config.resource_root));
        let dispatcher = AudioDispatcher::with_session(backend, args.config.session);
        if !dispatcher.session_state().is_active() {
            return Err("audio output unavailable".to_string());
        }

        let provider = Arc::new(StaticAssetProvider::new(assets.clone()));
        dispatcher.assign_provider(&provider);
        let summary = dispatcher
            .refresh_audio_assets()
            .map_err(|e| e.to_string())?;
        for identity in summary.missing.iter().chain(&summary.failed) {
            eprintln!("Skipping {identity}: not playable");
        }

        for asset in &assets {
            let outcome = dispatcher.request_play(asset).map_err(|e| e.to_string())?;
            println!("{asset}: {outcome:?}");
            while dispatcher.player_state(asset) == Some(PlaybackState::Playing) {
                thread::sleep(POLL_INTERVAL);
            }
        }
        Ok(())
    }
}

#[cfg(feature = "rodio-backend")]
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
