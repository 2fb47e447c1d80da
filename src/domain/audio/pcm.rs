//! Multi-channel floating-point PCM buffers

use crate::domain::error::{AllocationError, PcmBufferError};

/// Decoded or rendered audio: one `f32` sequence per channel.
///
/// Invariant: every channel holds exactly `frame_count()` samples.
/// Samples are nominally in [-1.0, 1.0] but are not clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmBuffer {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl PcmBuffer {
    /// Build a buffer from planar channel data
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> Result<Self, PcmBufferError> {
        if sample_rate == 0 {
            return Err(PcmBufferError::ZeroSampleRate);
        }
        let expected = match channels.first() {
            Some(first) => first.len(),
            None => return Err(PcmBufferError::NoChannels),
        };
        if channels.len() > usize::from(u16::MAX) {
            return Err(PcmBufferError::TooManyChannels(channels.len()));
        }
        if let Some((channel, samples)) = channels
            .iter()
            .enumerate()
            .find(|(_, samples)| samples.len() != expected)
        {
            return Err(PcmBufferError::ChannelLengthMismatch {
                channel,
                expected,
                actual: samples.len(),
            });
        }

        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// A buffer of `frame_count` zero samples per channel
    pub fn silence(
        sample_rate: u32,
        channel_count: u16,
        frame_count: usize,
    ) -> Result<Self, PcmBufferError> {
        Self::new(
            sample_rate,
            vec![vec![0.0; frame_count]; usize::from(channel_count)],
        )
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> u16 {
        // Bounded by the constructor
        self.channels.len() as u16
    }

    /// Samples per channel
    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Samples of one channel, if it exists
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    pub fn into_channels(self) -> Vec<Vec<f32>> {
        self.channels
    }

    /// Playback length in milliseconds at this buffer's own rate
    pub fn duration_ms(&self) -> u64 {
        self.frame_count() as u64 * 1000 / u64::from(self.sample_rate)
    }

    /// Samples in interleaved order: frames in order, channels 0..n
    /// within each frame. Nothing is materialized.
    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.frame_count())
            .flat_map(move |frame| self.channels.iter().map(move |channel| channel[frame]))
    }

    /// Collect the interleaved stream. Samples are copied verbatim.
    ///
    /// Fails instead of aborting when the stream cannot be allocated.
    pub fn interleave(&self) -> Result<InterleavedSamples, AllocationError> {
        let len = self
            .frame_count()
            .checked_mul(self.channels.len())
            .ok_or(AllocationError::OutOfMemory {
                requested_bytes: usize::MAX,
            })?;

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(len)
            .map_err(|_| AllocationError::OutOfMemory {
                requested_bytes: len.saturating_mul(std::mem::size_of::<f32>()),
            })?;
        samples.extend(self.interleaved());

        Ok(InterleavedSamples {
            channel_count: self.channel_count(),
            samples,
        })
    }
}

/// Flat sample stream where `(frame, channel)` lives at
/// `frame * channel_count + channel`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterleavedSamples {
    channel_count: u16,
    samples: Vec<f32>,
}

impl InterleavedSamples {
    pub fn channel_count(&self) -> u16 {
        self.channel_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.samples.len() / usize::from(self.channel_count)
    }

    /// Sample at a logical position
    pub fn get(&self, frame: usize, channel: u16) -> Option<f32> {
        if channel >= self.channel_count {
            return None;
        }
        self.samples
            .get(frame * usize::from(self.channel_count) + usize::from(channel))
            .copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_channel_list() {
        assert_eq!(
            PcmBuffer::new(44100, Vec::new()),
            Err(PcmBufferError::NoChannels)
        );
    }

    #[test]
    fn rejects_zero_sample_rate() {
        assert_eq!(
            PcmBuffer::new(0, vec![vec![0.0]]),
            Err(PcmBufferError::ZeroSampleRate)
        );
    }

    #[test]
    fn rejects_ragged_channels() {
        let err = PcmBuffer::new(8000, vec![vec![0.0; 4], vec![0.0; 3]]).unwrap_err();
        assert_eq!(
            err,
            PcmBufferError::ChannelLengthMismatch {
                channel: 1,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn zero_frames_is_valid() {
        let buffer = PcmBuffer::new(44100, vec![Vec::new(), Vec::new()]).unwrap();
        assert_eq!(buffer.frame_count(), 0);
        assert_eq!(buffer.channel_count(), 2);
        assert!(buffer.interleave().unwrap().is_empty());
    }

    #[test]
    fn interleaved_length_is_frames_times_channels() {
        let buffer = PcmBuffer::silence(16000, 3, 17).unwrap();
        let interleaved = buffer.interleave().unwrap();
        assert_eq!(interleaved.len(), 17 * 3);
        assert_eq!(interleaved.frame_count(), 17);
    }

    #[test]
    fn stereo_interleave_order() {
        let buffer = PcmBuffer::new(48000, vec![vec![0.5, 0.25], vec![-0.5, -0.25]]).unwrap();
        let interleaved = buffer.interleave().unwrap();
        assert_eq!(interleaved.as_slice(), &[0.5, -0.5, 0.25, -0.25]);
        assert_eq!(interleaved.get(1, 1), Some(-0.25));
        assert_eq!(interleaved.get(0, 2), None);
    }

    #[test]
    fn interleave_does_not_clamp() {
        let buffer = PcmBuffer::new(8000, vec![vec![1.5, -2.0]]).unwrap();
        assert_eq!(buffer.interleave().unwrap().as_slice(), &[1.5, -2.0]);
    }

    #[test]
    fn lazy_stream_matches_collected_stream() {
        let buffer = PcmBuffer::new(
            44100,
            vec![vec![0.1, 0.2, 0.3], vec![-0.1, -0.2, -0.3], vec![9.0, 8.0, 7.0]],
        )
        .unwrap();
        let lazy: Vec<f32> = buffer.interleaved().collect();
        assert_eq!(lazy.as_slice(), buffer.interleave().unwrap().as_slice());
        assert_eq!(lazy[..3], [0.1, -0.1, 9.0]);
    }

    #[test]
    fn duration_in_millis() {
        let buffer = PcmBuffer::silence(8000, 1, 4000).unwrap();
        assert_eq!(buffer.duration_ms(), 500);
    }
}
