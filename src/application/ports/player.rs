//! Audio playback port interface

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::PcmBuffer;

/// Errors that can occur during playback
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio output device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Port for playing PCM through the speakers
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play the buffer to its end, or until `stop` is raised
    async fn play(&self, pcm: PcmBuffer, stop: Arc<AtomicBool>) -> Result<(), PlaybackError>;
}
