//! Record use case

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::domain::audio::SampleRate;
use crate::domain::recording::{Duration, NewRecording, RecordingId, RecordingLibrary};

use super::ports::{AudioRecorder, ProgressCallback, RecordingError};

/// Input parameters for one take
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordInput {
    /// Upper bound on the take length
    pub max_duration: Duration,
    /// Export sample rate stored with the recording
    pub sample_rate: SampleRate,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct RecordCallbacks {
    /// Called during recording with (elapsed_ms, total_ms)
    pub on_progress: Option<ProgressCallback>,
    /// Called when recording starts
    pub on_recording_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called when recording ends with the human-readable capture size
    pub on_recording_end: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

/// Captures takes and files them in a library
pub struct RecordUseCase<R>
where
    R: AudioRecorder,
{
    recorder: R,
    stop_flag: Arc<AtomicBool>,
}

impl<R> RecordUseCase<R>
where
    R: AudioRecorder,
{
    pub fn new(recorder: R) -> Self {
        Self {
            recorder,
            stop_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get the stop flag for external signal handling
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Signal the current take to stop early
    pub fn stop_early(&self) {
        self.stop_flag.store(true, Ordering::SeqCst);
    }

    /// Record one take and add it to `library`.
    ///
    /// Capture failures leave the library unchanged.
    pub async fn execute(
        &self,
        library: &mut RecordingLibrary,
        input: RecordInput,
        callbacks: RecordCallbacks,
    ) -> Result<RecordingId, RecordingError> {
        self.stop_flag.store(false, Ordering::SeqCst);

        if let Some(ref cb) = callbacks.on_recording_start {
            cb();
        }

        let captured = self
            .recorder
            .record(input.max_duration, self.stop_flag(), callbacks.on_progress)
            .await?;

        if let Some(ref cb) = callbacks.on_recording_end {
            cb(&captured.blob.human_readable_size());
        }

        // The elapsed counter ticks once per whole second
        let duration_secs = captured.elapsed_ms / 1000;
        let id = library.add(NewRecording::now(
            captured.blob,
            duration_secs,
            input.sample_rate,
        ));

        info!(recording = id, duration_secs, sample_rate = input.sample_rate.hz(), "recorded");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::CapturedAudio;
    use crate::domain::audio::{ContainerType, RawAudioBlob};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockRecorder {
        elapsed_ms: u64,
    }

    #[async_trait]
    impl AudioRecorder for MockRecorder {
        async fn record(
            &self,
            _max_duration: Duration,
            _stop: Arc<AtomicBool>,
            on_progress: Option<ProgressCallback>,
        ) -> Result<CapturedAudio, RecordingError> {
            if let Some(progress) = on_progress {
                progress(self.elapsed_ms, self.elapsed_ms);
            }
            Ok(CapturedAudio {
                blob: RawAudioBlob::new(vec![0u8; 100], ContainerType::Flac),
                elapsed_ms: self.elapsed_ms,
            })
        }
    }

    struct BrokenRecorder;

    #[async_trait]
    impl AudioRecorder for BrokenRecorder {
        async fn record(
            &self,
            _max_duration: Duration,
            _stop: Arc<AtomicBool>,
            _on_progress: Option<ProgressCallback>,
        ) -> Result<CapturedAudio, RecordingError> {
            Err(RecordingError::NoAudioDevice)
        }
    }

    #[tokio::test]
    async fn execute_adds_recording_to_library() {
        let use_case = RecordUseCase::new(MockRecorder { elapsed_ms: 4_900 });
        let mut library = RecordingLibrary::new();
        let input = RecordInput {
            sample_rate: SampleRate::new(22050).unwrap(),
            ..Default::default()
        };

        let id = use_case
            .execute(&mut library, input, RecordCallbacks::default())
            .await
            .unwrap();

        let recording = library.get(id).unwrap();
        assert_eq!(recording.duration_secs(), 4);
        assert_eq!(recording.sample_rate().hz(), 22050);
        assert_eq!(recording.blob().container(), ContainerType::Flac);
    }

    #[tokio::test]
    async fn execute_reports_progress_and_size() {
        let use_case = RecordUseCase::new(MockRecorder { elapsed_ms: 1_000 });
        let mut library = RecordingLibrary::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sizes = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = Arc::clone(&seen);
        let sizes_clone = Arc::clone(&sizes);
        let callbacks = RecordCallbacks {
            on_progress: Some(Arc::new(move |elapsed, total| {
                seen_clone.lock().unwrap().push((elapsed, total));
            })),
            on_recording_start: None,
            on_recording_end: Some(Box::new(move |size: &str| {
                sizes_clone.lock().unwrap().push(size.to_string());
            })),
        };

        use_case
            .execute(&mut library, RecordInput::default(), callbacks)
            .await
            .unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), &[(1_000, 1_000)]);
        assert_eq!(sizes.lock().unwrap().as_slice(), &["100 B".to_string()]);
    }

    #[tokio::test]
    async fn failed_capture_leaves_library_empty() {
        let use_case = RecordUseCase::new(BrokenRecorder);
        let mut library = RecordingLibrary::new();

        let err = use_case
            .execute(&mut library, RecordInput::default(), RecordCallbacks::default())
            .await
            .unwrap_err();

        assert!(matches!(err, RecordingError::NoAudioDevice));
        assert!(library.is_empty());
    }

    #[test]
    fn stop_early_raises_flag() {
        let use_case = RecordUseCase::new(BrokenRecorder);
        let flag = use_case.stop_flag();
        use_case.stop_early();
        assert!(flag.load(Ordering::SeqCst));
    }
}
