//! Recording port interface

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::RawAudioBlob;
use crate::domain::recording::Duration;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Failed to read captured audio: {0}")]
    ReadFailed(String),

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Progress callback type for reporting recording progress.
/// Parameters: (elapsed_ms, total_ms)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Compressed capture plus how long it actually ran
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    pub blob: RawAudioBlob,
    pub elapsed_ms: u64,
}

/// Port for microphone capture
#[async_trait]
pub trait AudioRecorder: Send + Sync {
    /// Record until `max_duration` elapses or `stop` is raised.
    ///
    /// # Arguments
    /// * `max_duration` - Upper bound on the recording length
    /// * `stop` - Set to true to end the recording early
    /// * `on_progress` - Optional callback for progress updates
    ///
    /// # Returns
    /// The compressed capture or an error
    async fn record(
        &self,
        max_duration: Duration,
        stop: Arc<AtomicBool>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<CapturedAudio, RecordingError>;
}
