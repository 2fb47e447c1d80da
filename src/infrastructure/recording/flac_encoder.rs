//! FLAC packaging for captured audio
//!
//! Captures are stored losslessly so that later WAV exports decode back
//! to exactly what the microphone delivered.
//!
//! Settings:
//! - Device sample rate (no resampling at capture time)
//! - Interleaved i16 input, any channel count
//! - 16-bit samples

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;

/// Bits per sample (16-bit audio)
const BITS_PER_SAMPLE: usize = 16;

/// Encode interleaved 16-bit PCM samples to a FLAC stream
pub fn encode_to_flac(
    pcm_samples: &[i16],
    channels: usize,
    sample_rate: u32,
) -> Result<Vec<u8>, EncodingError> {
    if channels == 0 || pcm_samples.len() % channels != 0 {
        return Err(EncodingError::Config(format!(
            "{} samples cannot be split into {} channels",
            pcm_samples.len(),
            channels
        )));
    }

    // flacenc works on i32 internally
    let samples_i32: Vec<i32> = pcm_samples.iter().map(|&s| i32::from(s)).collect();

    let config = config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| EncodingError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples_i32,
        channels,
        BITS_PER_SAMPLE,
        sample_rate as usize,
    );

    let flac_stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| EncodingError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    flac_stream
        .write(&mut sink)
        .map_err(|e| EncodingError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}

/// FLAC encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),
}
