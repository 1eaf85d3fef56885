//! Native audio output using rodio
//!
//! Sounds are read from a [`ResourceBundle`] once at prepare time and decoded
//! again for every start, so each player can restart from the beginning without
//! touching the filesystem.

use super::asset::AudioAsset;
use super::backend::{AudioBackend, AudioHandle, PlaybackState};
use super::bundle::ResourceBundle;
use super::session::{SessionCategory, SessionConfig};
use super::LOG_TARGET;
use crate::{JbitsError, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs;
use std::io::Cursor;
use std::sync::Arc;

/// Audio backend playing through the default output device
pub struct RodioBackend {
    bundle: ResourceBundle,
    /// The stream must be kept alive for the handle to remain valid.
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
}

/// SAFETY: RodioBackend is Send
///
/// `rodio::OutputStream` is marked `!Send` on some platforms. The backend only
/// keeps it to hold the device open and never calls into it after
/// construction; all playback goes through `OutputStreamHandle`, which is
/// `Send + Sync`. The dispatcher keeps the backend behind a mutex.
unsafe impl Send for RodioBackend {}

impl RodioBackend {
    /// Backend resolving sounds from `bundle`
    ///
    /// The output device is opened by [`AudioBackend::configure_session`].
    pub fn new(bundle: ResourceBundle) -> Self {
        Self {
            bundle,
            _stream: None,
            stream_handle: None,
        }
    }

    /// Bundle the sounds are read from
    pub fn bundle(&self) -> &ResourceBundle {
        &self.bundle
    }
}

impl AudioBackend for RodioBackend {
    fn configure_session(&mut self, config: &SessionConfig) -> Result<()> {
        if self.stream_handle.is_some() {
            return Ok(());
        }
        if config.category != SessionCategory::Ambient || !config.mix_with_others {
            // rodio always mixes with the rest of the system
            log::debug!(target: LOG_TARGET, "Session {config:?} treated as mixable ambient output");
        }

        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| JbitsError::SessionUnavailable(format!("Failed to open audio output: {e}")))?;
        self._stream = Some(stream);
        self.stream_handle = Some(handle);
        Ok(())
    }

    fn prepare(&mut self, asset: &AudioAsset) -> Result<Box<dyn AudioHandle>> {
        let stream_handle = self
            .stream_handle
            .clone()
            .ok_or_else(|| JbitsError::SessionUnavailable("audio output not opened".into()))?;

        let path = self.bundle.require(asset.name(), asset.file_extension())?;
        let data: Arc<[u8]> = fs::read(&path)?.into();

        // Decode once up front so unplayable files are rejected at refresh time
        Decoder::new(Cursor::new(Arc::clone(&data))).map_err(|e| {
            JbitsError::AudioDevice(format!("Failed to prepare audio with path {}: {e}", path.display()))
        })?;

        Ok(Box::new(RodioHandle {
            stream_handle,
            data,
            sink: None,
            volume: asset.volume(),
        }))
    }
}

/// Prepared player holding the encoded sound in memory
struct RodioHandle {
    stream_handle: OutputStreamHandle,
    data: Arc<[u8]>,
    sink: Option<Sink>,
    volume: f32,
}

impl AudioHandle for RodioHandle {
    fn play_from_start(&mut self) -> Result<()> {
        if let Some(previous) = self.sink.take() {
            previous.stop();
        }

        let source = Decoder::new(Cursor::new(Arc::clone(&self.data)))
            .map_err(|e| JbitsError::AudioDevice(format!("Failed to decode audio: {e}")))?;
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| JbitsError::AudioDevice(format!("Failed to create audio sink: {e}")))?;
        sink.set_volume(self.volume);
        sink.append(source);

        self.sink = Some(sink);
        Ok(())
    }

    fn state(&self) -> PlaybackState {
        match &self.sink {
            Some(sink) if !sink.empty() => PlaybackState::Playing,
            _ => PlaybackState::Idle,
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }
}
