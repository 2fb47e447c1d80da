//! Audio decoding port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{PcmBuffer, RawAudioBlob};

/// Decoding errors
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Audio data is empty")]
    Empty,

    #[error("Unsupported audio container: {0}")]
    UnsupportedContainer(String),

    #[error("Unsupported audio codec: {0}")]
    UnsupportedCodec(String),

    #[error("No decodable audio track found")]
    NoAudioTrack,

    #[error("Malformed audio data: {0}")]
    Malformed(String),

    #[error("Decoder task failed: {0}")]
    TaskFailed(String),
}

/// Port for turning compressed audio into PCM at its native rate
#[async_trait]
pub trait AudioDecoder: Send + Sync {
    /// Decode the whole blob.
    ///
    /// # Returns
    /// Planar float PCM with the source's channel count and sample rate
    async fn decode(&self, blob: &RawAudioBlob) -> Result<PcmBuffer, DecodeError>;
}
