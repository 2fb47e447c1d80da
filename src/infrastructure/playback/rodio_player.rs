//! Rodio-based playback adapter
//!
//! Feeds the interleaved stream to the default output device at the
//! buffer's own sample rate. rodio resamples to the device if needed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Sink};
use tracing::debug;

use crate::application::ports::{AudioPlayer, PlaybackError};
use crate::domain::audio::PcmBuffer;

/// How often the playback thread checks for a stop request
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Audio player using rodio
#[derive(Debug, Clone, Copy, Default)]
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }

    /// Play synchronously (called from spawn_blocking)
    fn play_blocking(pcm: PcmBuffer, stop: Arc<AtomicBool>) -> Result<(), PlaybackError> {
        if pcm.frame_count() == 0 {
            return Ok(());
        }

        let channels = pcm.channel_count();
        let sample_rate = pcm.sample_rate();
        let samples = pcm
            .interleave()
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?
            .into_samples();

        let (_stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
        let sink =
            Sink::try_new(&stream_handle).map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;

        debug!(channels, sample_rate, "starting playback");
        sink.append(SamplesBuffer::new(channels, sample_rate, samples));

        while !sink.empty() {
            if stop.load(Ordering::SeqCst) {
                sink.stop();
                debug!("playback stopped early");
                break;
            }
            std::thread::sleep(POLL_INTERVAL);
        }

        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, pcm: PcmBuffer, stop: Arc<AtomicBool>) -> Result<(), PlaybackError> {
        tokio::task::spawn_blocking(move || Self::play_blocking(pcm, stop))
            .await
            .map_err(|e| PlaybackError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}
