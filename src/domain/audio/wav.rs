//! PCM container (WAV) encoder
//!
//! Writes the minimal 44-byte RIFF/WAVE header followed by interleaved
//! 16-bit little-endian samples.
//!
//! Layout quirks kept for compatibility with files already exported:
//! - The byte-rate field is always `sample_rate * 4`, whatever the channel
//!   count. This only matches the canonical value for 16-bit stereo.
//! - Samples are scaled by 32767 and rounded without clamping, so values
//!   outside [-1.0, 1.0] wrap around in the 16-bit range.

use crate::domain::audio::{ContainerType, PcmBuffer};
use crate::domain::error::AllocationError;

/// Size of the fixed header in bytes
pub const HEADER_LEN: usize = 44;

/// Bits per sample (16-bit integer PCM)
pub const BITS_PER_SAMPLE: u16 = 16;

/// Format tag for integer PCM
const FORMAT_PCM: u16 = 1;

/// Size of the "fmt " sub-chunk body
const FMT_CHUNK_LEN: u32 = 16;

/// Fixed multiplier used for the byte-rate field
const BYTE_RATE_MULTIPLIER: u32 = 4;

/// Full-scale amplitude for 16-bit samples
const FULL_SCALE: f64 = 32767.0;

const BYTES_PER_SAMPLE: usize = 2;

/// Encoded container bytes. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFile {
    bytes: Vec<u8>,
    container: ContainerType,
}

impl ContainerFile {
    pub fn new(bytes: Vec<u8>, container: ContainerType) -> Self {
        Self { bytes, container }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn container(&self) -> ContainerType {
        self.container
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Header fields derived from a PCM buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub channel_count: u16,
    pub sample_rate: u32,
    pub data_len: u32,
}

impl WavHeader {
    /// RIFF chunk size: file size minus the 8-byte RIFF preamble
    pub fn riff_len(&self) -> u32 {
        36 + self.data_len
    }

    pub fn byte_rate(&self) -> u32 {
        self.sample_rate.wrapping_mul(BYTE_RATE_MULTIPLIER)
    }

    pub fn block_align(&self) -> u16 {
        self.channel_count.wrapping_mul(2)
    }

    /// Serialize the header into `out`
    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&self.riff_len().to_le_bytes());
        out.extend_from_slice(b"WAVE");
        out.extend_from_slice(b"fmt ");
        out.extend_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out.extend_from_slice(&FORMAT_PCM.to_le_bytes());
        out.extend_from_slice(&self.channel_count.to_le_bytes());
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&self.byte_rate().to_le_bytes());
        out.extend_from_slice(&self.block_align().to_le_bytes());
        out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&self.data_len.to_le_bytes());
    }
}

/// Convert one float sample to 16-bit PCM.
///
/// `round(sample * 32767)`, narrowed with two's-complement wrapping.
/// NaN and infinities map to 0.
pub fn sample_to_i16(sample: f32) -> i16 {
    let scaled = (f64::from(sample) * FULL_SCALE).round();
    if !scaled.is_finite() {
        return 0;
    }
    // Low 16 bits of the integer value
    scaled.rem_euclid(65536.0) as u16 as i16
}

/// Data chunk size for `frame_count` frames of `channel_count` samples,
/// if the RIFF size fields can hold it
fn data_len_for(frame_count: usize, channel_count: u16) -> Result<u32, AllocationError> {
    let data_bytes = (frame_count as u64)
        .saturating_mul(u64::from(channel_count))
        .saturating_mul(BYTES_PER_SAMPLE as u64);
    u32::try_from(data_bytes)
        .ok()
        .filter(|len| len.checked_add(36).is_some())
        .ok_or(AllocationError::SizeLimit { data_bytes })
}

/// Encode a PCM buffer into a WAV container.
///
/// Samples are streamed straight into the output, so the only large
/// allocation is the file itself, reserved up front.
pub fn encode_wav(buffer: &PcmBuffer) -> Result<ContainerFile, AllocationError> {
    let data_len = data_len_for(buffer.frame_count(), buffer.channel_count())?;

    let total_len = HEADER_LEN + data_len as usize;
    let mut bytes = Vec::new();
    bytes
        .try_reserve_exact(total_len)
        .map_err(|_| AllocationError::OutOfMemory {
            requested_bytes: total_len,
        })?;

    let header = WavHeader {
        channel_count: buffer.channel_count(),
        sample_rate: buffer.sample_rate(),
        data_len,
    };
    header.write_to(&mut bytes);

    for sample in buffer.interleaved() {
        bytes.extend_from_slice(&sample_to_i16(sample).to_le_bytes());
    }

    Ok(ContainerFile::new(bytes, ContainerType::Wav))
}
