//! Audio decoder using symphonia
//!
//! Decodes a whole in-memory blob to planar f32 PCM at the source's
//! native sample rate and channel count. Supported containers follow the
//! enabled symphonia features (WAV, FLAC, Ogg/Vorbis, MKV/WebM, MP3, AAC/MP4).
//!
//! symphonia has no Opus decoder. Browser WebM and Ogg captures usually
//! carry Opus, so those fail with `DecodeError::UnsupportedCodec`.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CodecType, DecoderOptions, CODEC_TYPE_NULL, CODEC_TYPE_OPUS};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::application::ports::{AudioDecoder, DecodeError};
use crate::domain::audio::{ContainerType, PcmBuffer, RawAudioBlob};

/// Decoder backed by symphonia's default codec and format registries
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }

    fn codec_error(codec: CodecType, err: SymphoniaError) -> DecodeError {
        if codec == CODEC_TYPE_OPUS {
            return DecodeError::UnsupportedCodec(
                "Opus cannot be decoded; re-encode as Vorbis, FLAC, MP3 or AAC".into(),
            );
        }
        DecodeError::UnsupportedCodec(err.to_string())
    }

    /// Decode every packet of the first audio track (blocking)
    fn decode_blocking(
        data: Arc<[u8]>,
        container: ContainerType,
    ) -> Result<PcmBuffer, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

        let mut hint = Hint::new();
        hint.with_extension(container.extension());
        hint.mime_type(container.mime_type());

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| DecodeError::UnsupportedContainer(e.to_string()))?;
        let mut format = probed.format;

        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecodeError::NoAudioTrack)?;
        let track_id = track.id;
        let mut sample_rate = track.codec_params.sample_rate;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| Self::codec_error(track.codec_params.codec, e))?;

        let mut channels: Vec<Vec<f32>> = Vec::new();
        let mut sample_buf: Option<SampleBuffer<f32>> = None;

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                // Chained streams are not followed
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(DecodeError::Malformed(e.to_string())),
            };

            if packet.track_id() != track_id {
                continue;
            }

            let decoded = match decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!(error = %e, "skipping undecodable packet");
                    continue;
                }
                Err(e) => return Err(DecodeError::Malformed(e.to_string())),
            };

            let spec = *decoded.spec();
            let frames = decoded.frames();
            if frames == 0 {
                continue;
            }

            let channel_count = spec.channels.count();
            if channels.is_empty() {
                channels = vec![Vec::new(); channel_count];
                sample_rate = sample_rate.or(Some(spec.rate));
            } else if channels.len() != channel_count {
                return Err(DecodeError::Malformed(format!(
                    "channel count changed from {} to {} mid-stream",
                    channels.len(),
                    channel_count
                )));
            }

            let too_small = sample_buf
                .as_ref()
                .map_or(true, |buf| buf.capacity() < decoded.capacity() * channel_count);
            if too_small {
                sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
            }

            if let Some(buf) = sample_buf.as_mut() {
                buf.copy_planar_ref(decoded);
                for (channel, plane) in buf.samples().chunks_exact(frames).enumerate() {
                    channels[channel].extend_from_slice(plane);
                }
            }
        }

        if channels.is_empty() {
            return Err(DecodeError::Malformed("no audio frames decoded".into()));
        }

        let sample_rate =
            sample_rate.ok_or_else(|| DecodeError::Malformed("missing sample rate".into()))?;

        debug!(
            channels = channels.len(),
            frames = channels[0].len(),
            sample_rate,
            "symphonia decode complete"
        );

        PcmBuffer::new(sample_rate, channels).map_err(|e| DecodeError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl AudioDecoder for SymphoniaDecoder {
    async fn decode(&self, blob: &RawAudioBlob) -> Result<PcmBuffer, DecodeError> {
        let data = blob.shared_data();
        let container = blob.container();

        tokio::task::spawn_blocking(move || Self::decode_blocking(data, container))
            .await
            .map_err(|e| DecodeError::TaskFailed(e.to_string()))?
    }
}
