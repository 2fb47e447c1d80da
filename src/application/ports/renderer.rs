//! Offline rendering port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{PcmBuffer, SampleRate};

/// Rendering errors
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Source does not match render session: {0}")]
    SessionMismatch(String),

    #[error("Resampling failed: {0}")]
    ResampleFailed(String),

    #[error("Render task failed: {0}")]
    TaskFailed(String),
}

/// Parameters of one offline render, created per export request.
///
/// Channel and frame counts are taken from the source unchanged; only the
/// sample rate differs. The frame count is not rescaled for the new rate,
/// so the rendered audio plays for `frame_count / sample_rate` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSession {
    pub channel_count: u16,
    pub frame_count: usize,
    pub sample_rate: SampleRate,
}

impl RenderSession {
    /// Session that renders `source` at `target`
    pub fn for_source(source: &PcmBuffer, target: SampleRate) -> Self {
        Self {
            channel_count: source.channel_count(),
            frame_count: source.frame_count(),
            sample_rate: target,
        }
    }
}

/// Port for non-real-time rendering of a complete source buffer
#[async_trait]
pub trait OfflineRenderer: Send + Sync {
    /// Render `source` through `session` to completion.
    ///
    /// The session is consumed; nothing is shared between renders.
    ///
    /// # Returns
    /// A buffer with the session's channel count, frame count and rate
    async fn render(
        &self,
        session: RenderSession,
        source: PcmBuffer,
    ) -> Result<PcmBuffer, RenderError>;
}
