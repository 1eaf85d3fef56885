//! Typed play requests
//!
//! Any part of an app can hold a [`PlayRequestSender`] and ask for a sound
//! without a reference to the dispatcher. The dispatcher drains the matching
//! receiver with [`AudioDispatcher::drain_requests`](super::AudioDispatcher::drain_requests)
//! or [`AudioDispatcher::listen`](super::AudioDispatcher::listen).

use super::asset::AudioAsset;
use crossbeam_channel::{Receiver, Sender};

/// Request to play one asset
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest {
    /// The sound to play
    pub asset: AudioAsset,
}

/// Receiving end consumed by the dispatcher
pub type PlayRequestReceiver = Receiver<PlayRequest>;

/// Cloneable sending end for play requests
#[derive(Debug, Clone)]
pub struct PlayRequestSender {
    sender: Sender<PlayRequest>,
}

impl PlayRequestSender {
    /// Ask for `asset` to be played.
    ///
    /// Returns false when the receiving side has been dropped.
    pub fn play(&self, asset: AudioAsset) -> bool {
        self.sender.send(PlayRequest { asset }).is_ok()
    }
}

/// Create an unbounded play request channel
pub fn play_request_channel() -> (PlayRequestSender, PlayRequestReceiver) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (PlayRequestSender { sender }, receiver)
}
