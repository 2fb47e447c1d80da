//! Preview use case: play a take back at its captured rate

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::recording::Recording;

use super::ports::{AudioDecoder, AudioPlayer, DecodeError, PlaybackError};

/// Errors from previewing a take
#[derive(Debug, Clone, Error)]
pub enum PreviewError {
    #[error("Decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// Decodes a recording and plays it
pub struct PreviewUseCase<D, P>
where
    D: AudioDecoder,
    P: AudioPlayer,
{
    decoder: D,
    player: P,
}

impl<D, P> PreviewUseCase<D, P>
where
    D: AudioDecoder,
    P: AudioPlayer,
{
    pub fn new(decoder: D, player: P) -> Self {
        Self { decoder, player }
    }

    /// Play `recording` until it ends or `stop` is raised.
    /// Returns the decoded length in milliseconds.
    pub async fn execute(
        &self,
        recording: &Recording,
        stop: Arc<AtomicBool>,
    ) -> Result<u64, PreviewError> {
        let blob = recording.blob();
        if blob.is_empty() {
            return Err(DecodeError::Empty.into());
        }

        let pcm = self.decoder.decode(blob).await?;
        let duration_ms = pcm.duration_ms();

        self.player.play(pcm, stop).await?;
        info!(recording = recording.id(), duration_ms, "played back");
        Ok(duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{ContainerType, PcmBuffer, RawAudioBlob, SampleRate};
    use crate::domain::recording::{NewRecording, RecordingLibrary};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct ToneDecoder;

    #[async_trait]
    impl AudioDecoder for ToneDecoder {
        async fn decode(&self, _blob: &RawAudioBlob) -> Result<PcmBuffer, DecodeError> {
            Ok(PcmBuffer::new(8000, vec![vec![0.25; 4000], vec![-0.25; 4000]]).unwrap())
        }
    }

    struct CorruptDecoder;

    #[async_trait]
    impl AudioDecoder for CorruptDecoder {
        async fn decode(&self, _blob: &RawAudioBlob) -> Result<PcmBuffer, DecodeError> {
            Err(DecodeError::Malformed("truncated".into()))
        }
    }

    /// Remembers the shape of everything it was asked to play
    #[derive(Default, Clone)]
    struct RecordingPlayer {
        played: Arc<Mutex<Vec<(u16, usize, u32)>>>,
    }

    #[async_trait]
    impl AudioPlayer for RecordingPlayer {
        async fn play(&self, pcm: PcmBuffer, _stop: Arc<AtomicBool>) -> Result<(), PlaybackError> {
            self.played.lock().unwrap().push((
                pcm.channel_count(),
                pcm.frame_count(),
                pcm.sample_rate(),
            ));
            Ok(())
        }
    }

    struct NoSpeakers;

    #[async_trait]
    impl AudioPlayer for NoSpeakers {
        async fn play(&self, _pcm: PcmBuffer, _stop: Arc<AtomicBool>) -> Result<(), PlaybackError> {
            Err(PlaybackError::DeviceNotAvailable("no default output".into()))
        }
    }

    fn library_with(bytes: Vec<u8>) -> RecordingLibrary {
        let mut library = RecordingLibrary::new();
        library.add(NewRecording::now(
            RawAudioBlob::new(bytes, ContainerType::Flac),
            1,
            SampleRate::default(),
        ));
        library
    }

    #[tokio::test]
    async fn plays_decoded_audio_at_native_rate() {
        let player = RecordingPlayer::default();
        let use_case = PreviewUseCase::new(ToneDecoder, player.clone());
        let library = library_with(vec![1; 32]);

        let duration_ms = use_case
            .execute(library.get(1).unwrap(), Arc::new(AtomicBool::new(false)))
            .await
            .unwrap();

        assert_eq!(duration_ms, 500);
        assert_eq!(player.played.lock().unwrap().as_slice(), &[(2, 4000, 8000)]);
    }

    #[tokio::test]
    async fn decode_failure_skips_playback() {
        let player = RecordingPlayer::default();
        let use_case = PreviewUseCase::new(CorruptDecoder, player.clone());
        let library = library_with(vec![1; 32]);

        let err = use_case
            .execute(library.get(1).unwrap(), Arc::new(AtomicBool::new(false)))
            .await
            .unwrap_err();

        assert!(matches!(err, PreviewError::Decode(DecodeError::Malformed(_))));
        assert!(player.played.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_take_is_not_decoded() {
        let use_case = PreviewUseCase::new(CorruptDecoder, RecordingPlayer::default());
        let library = library_with(Vec::new());

        let err = use_case
            .execute(library.get(1).unwrap(), Arc::new(AtomicBool::new(false)))
            .await
            .unwrap_err();

        assert!(matches!(err, PreviewError::Decode(DecodeError::Empty)));
    }

    #[tokio::test]
    async fn missing_output_device_is_reported() {
        let use_case = PreviewUseCase::new(ToneDecoder, NoSpeakers);
        let library = library_with(vec![1; 32]);

        let err = use_case
            .execute(library.get(1).unwrap(), Arc::new(AtomicBool::new(false)))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no default output"));
    }
}
