//! Decode/render pipeline
//!
//! Compressed bytes in, PCM at the target sample rate out. The decoder
//! and renderer do the signal work; this module only sequences them and
//! owns the per-request render session.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::audio::{PcmBuffer, RawAudioBlob, SampleRate};

use super::ports::{AudioDecoder, DecodeError, OfflineRenderer, RenderError, RenderSession};

/// Errors from the decode/render pipeline
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Decode then render a blob at a target sample rate
pub struct DecodeRenderPipeline<D, R>
where
    D: AudioDecoder,
    R: OfflineRenderer,
{
    decoder: D,
    renderer: R,
}

impl<D, R> DecodeRenderPipeline<D, R>
where
    D: AudioDecoder,
    R: OfflineRenderer,
{
    pub fn new(decoder: D, renderer: R) -> Self {
        Self { decoder, renderer }
    }

    /// Run the pipeline to completion.
    ///
    /// Fails without partial output if either stage fails. Nothing is
    /// retried.
    #[instrument(skip(self, blob), fields(container = %blob.container(), bytes = blob.size_bytes()))]
    pub async fn run(
        &self,
        blob: &RawAudioBlob,
        target: SampleRate,
    ) -> Result<PcmBuffer, PipelineError> {
        if blob.is_empty() {
            return Err(DecodeError::Empty.into());
        }

        let decoded = self.decoder.decode(blob).await?;
        debug!(
            channels = decoded.channel_count(),
            frames = decoded.frame_count(),
            source_rate = decoded.sample_rate(),
            duration_ms = decoded.duration_ms(),
            "decoded"
        );

        let session = RenderSession::for_source(&decoded, target);
        let rendered = self.renderer.render(session, decoded).await?;

        if rendered.channel_count() != session.channel_count
            || rendered.frame_count() != session.frame_count
            || rendered.sample_rate() != session.sample_rate.hz()
        {
            return Err(RenderError::SessionMismatch(format!(
                "rendered {} ch x {} frames @ {} Hz, session wants {} ch x {} frames @ {}",
                rendered.channel_count(),
                rendered.frame_count(),
                rendered.sample_rate(),
                session.channel_count,
                session.frame_count,
                session.sample_rate,
            ))
            .into());
        }

        debug!(
            target_rate = target.hz(),
            duration_ms = rendered.duration_ms(),
            "rendered"
        );
        Ok(rendered)
    }
}
