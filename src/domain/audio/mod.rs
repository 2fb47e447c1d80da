//! Audio domain module
//!
//! Compressed blobs, PCM buffers, and the PCM container encoder.

mod blob;
mod pcm;
mod sample_rate;
pub mod wav;

pub use blob::{human_readable_size, ContainerType, RawAudioBlob};
pub use pcm::{InterleavedSamples, PcmBuffer};
pub use sample_rate::{SampleRate, DEFAULT_SAMPLE_RATE_HZ, STANDARD_SAMPLE_RATES};
pub use wav::{encode_wav, ContainerFile};
