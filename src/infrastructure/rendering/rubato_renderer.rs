//! Offline renderer using rubato
//!
//! Plays a whole source buffer into a render session:
//! - The source is resampled from its own rate to the session rate
//! - The result is fitted to the session's frame count, padding with
//!   silence when short and cutting when long
//!
//! The session frame count is the source's, so a rate change alters the
//! playback length instead of preserving it.

use async_trait::async_trait;
use rubato::{FftFixedIn, Resampler};
use tracing::debug;

use crate::application::ports::{OfflineRenderer, RenderError, RenderSession};
use crate::domain::audio::PcmBuffer;

/// Input frames per resampler chunk
const CHUNK_SIZE: usize = 1024;

/// FFT sub-chunks per chunk
const SUB_CHUNKS: usize = 2;

/// Offline renderer backed by rubato's FFT resampler
#[derive(Debug, Clone, Copy, Default)]
pub struct RubatoRenderer;

impl RubatoRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_blocking(
        session: RenderSession,
        source: PcmBuffer,
    ) -> Result<PcmBuffer, RenderError> {
        if source.channel_count() != session.channel_count {
            return Err(RenderError::SessionMismatch(format!(
                "source has {} channels, session has {}",
                source.channel_count(),
                session.channel_count
            )));
        }

        let from = source.sample_rate();
        let to = session.sample_rate.hz();

        let mut channels = if from == to || source.frame_count() == 0 {
            source.into_channels()
        } else {
            Self::resample(source.channels(), from, to)?
        };

        for channel in &mut channels {
            channel.resize(session.frame_count, 0.0);
        }

        debug!(
            from,
            to,
            frames = session.frame_count,
            channels = session.channel_count,
            "offline render complete"
        );

        PcmBuffer::new(to, channels).map_err(|e| RenderError::SessionMismatch(e.to_string()))
    }

    /// Resample every channel from `from` Hz to `to` Hz
    fn resample(input: &[Vec<f32>], from: u32, to: u32) -> Result<Vec<Vec<f32>>, RenderError> {
        let channel_count = input.len();
        let frames = input.first().map_or(0, Vec::len);
        let expected = (frames as u64 * u64::from(to)).div_ceil(u64::from(from)) as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            from as usize,
            to as usize,
            CHUNK_SIZE,
            SUB_CHUNKS,
            channel_count,
        )
        .map_err(|e| RenderError::ResampleFailed(format!("Resampler init failed: {}", e)))?;

        let delay = resampler.output_delay();
        let wanted = expected + delay;
        let mut output = vec![Vec::with_capacity(wanted); channel_count];

        let mut input_pos = 0;
        while input_pos < frames {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(frames);

            // Last chunk is zero-padded up to the resampler's chunk size
            let chunk: Vec<Vec<f32>> = input
                .iter()
                .map(|samples| {
                    let mut part = samples[input_pos..end_pos].to_vec();
                    part.resize(frames_needed, 0.0);
                    part
                })
                .collect();

            let resampled = resampler
                .process(&chunk, None)
                .map_err(|e| RenderError::ResampleFailed(e.to_string()))?;
            Self::append(&mut output, resampled);
            input_pos = end_pos;
        }

        // Flush the filter delay
        while output[0].len() < wanted {
            let resampled = resampler
                .process_partial::<Vec<f32>>(None, None)
                .map_err(|e| RenderError::ResampleFailed(e.to_string()))?;
            if resampled.first().map_or(true, Vec::is_empty) {
                break;
            }
            Self::append(&mut output, resampled);
        }

        for channel in &mut output {
            channel.drain(..delay.min(channel.len()));
            channel.truncate(expected);
        }

        Ok(output)
    }

    fn append(output: &mut [Vec<f32>], resampled: Vec<Vec<f32>>) {
        for (out, chunk) in output.iter_mut().zip(resampled) {
            out.extend(chunk);
        }
    }
}

#[async_trait]
impl OfflineRenderer for RubatoRenderer {
    async fn render(
        &self,
        session: RenderSession,
        source: PcmBuffer,
    ) -> Result<PcmBuffer, RenderError> {
        tokio::task::spawn_blocking(move || Self::render_blocking(session, source))
            .await
            .map_err(|e| RenderError::TaskFailed(e.to_string()))?
    }
}
