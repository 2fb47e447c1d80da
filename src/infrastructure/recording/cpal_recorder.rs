//! Cross-platform audio recorder using cpal
//!
//! Capture settings:
//! - Default input device at its native sample rate
//! - Mixed down to mono, 16-bit
//! - Packaged as FLAC once the take ends

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate as CpalSampleRate, StreamConfig};
use tokio::time::{interval, Duration as TokioDuration};
use tracing::{debug, warn};

use super::flac_encoder::encode_to_flac;
use crate::application::ports::{AudioRecorder, CapturedAudio, ProgressCallback, RecordingError};
use crate::domain::audio::{ContainerType, RawAudioBlob};
use crate::domain::recording::Duration;

/// How often the capture thread checks the stop conditions
const POLL_INTERVAL_MS: u64 = 50;

/// Audio recorder using cpal.
///
/// The stream lives on a blocking thread because `cpal::Stream` is not
/// `Send`.
pub struct CpalRecorder {
    /// Captured samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    /// Whether a take is running
    is_recording: Arc<AtomicBool>,
}

impl CpalRecorder {
    pub fn new() -> Self {
        Self {
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            is_recording: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording.load(Ordering::SeqCst)
    }

    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an i16/f32 configuration, preferring fewer channels, at the
    /// device's default rate when the range allows it
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let preferred_rate = device
            .default_input_config()
            .map(|c| c.sample_rate())
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get default config: {}", e)))?;

        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let config_range = supported_configs
            .filter(|c| matches!(c.sample_format(), SampleFormat::I16 | SampleFormat::F32))
            .min_by_key(|c| c.channels())
            .ok_or(RecordingError::StartFailed(
                "No suitable config found".into(),
            ))?;

        let sample_rate = CpalSampleRate(preferred_rate.0.clamp(
            config_range.min_sample_rate().0,
            config_range.max_sample_rate().0,
        ));

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Average interleaved frames down to one channel
    fn mix_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels <= 1 {
            return samples.to_vec();
        }

        samples
            .chunks(usize::from(channels))
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| i32::from(s)).sum();
                (sum / i32::from(channels)) as i16
            })
            .collect()
    }

    fn f32_to_i16(samples: &[f32]) -> Vec<i16> {
        samples
            .iter()
            .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
            .collect()
    }

    fn push_samples(buffer: &StdMutex<Vec<i16>>, mono: &[i16]) {
        if let Ok(mut buffer) = buffer.lock() {
            buffer.extend_from_slice(mono);
        }
    }

    /// Run a stream until the limit passes or `stop` is raised (blocking).
    /// Returns the device sample rate.
    fn capture_blocking(
        audio_buffer: Arc<StdMutex<Vec<i16>>>,
        is_recording: Arc<AtomicBool>,
        stop: Arc<AtomicBool>,
        limit: std::time::Duration,
    ) -> Result<u32, RecordingError> {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device)?;
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;
        debug!(sample_rate, channels, ?sample_format, "opening input stream");

        let on_error = |err: cpal::StreamError| warn!(error = %err, "audio stream error");

        let stream = match sample_format {
            SampleFormat::I16 => {
                let buffer = Arc::clone(&audio_buffer);
                let active = Arc::clone(&is_recording);
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if active.load(Ordering::SeqCst) {
                            Self::push_samples(&buffer, &Self::mix_to_mono(data, channels));
                        }
                    },
                    on_error,
                    None,
                )
            }
            SampleFormat::F32 => {
                let buffer = Arc::clone(&audio_buffer);
                let active = Arc::clone(&is_recording);
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if active.load(Ordering::SeqCst) {
                            let pcm = Self::f32_to_i16(data);
                            Self::push_samples(&buffer, &Self::mix_to_mono(&pcm, channels));
                        }
                    },
                    on_error,
                    None,
                )
            }
            other => {
                return Err(RecordingError::StartFailed(format!(
                    "Unsupported sample format: {:?}",
                    other
                )))
            }
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        let started = Instant::now();
        while started.elapsed() < limit && !stop.load(Ordering::SeqCst) {
            std::thread::sleep(std::time::Duration::from_millis(POLL_INTERVAL_MS));
        }

        is_recording.store(false, Ordering::SeqCst);
        drop(stream);

        Ok(sample_rate)
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioRecorder for CpalRecorder {
    async fn record(
        &self,
        max_duration: Duration,
        stop: Arc<AtomicBool>,
        on_progress: Option<ProgressCallback>,
    ) -> Result<CapturedAudio, RecordingError> {
        if self.is_recording.swap(true, Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        if let Ok(mut buffer) = self.audio_buffer.lock() {
            buffer.clear();
        }

        let total_ms = max_duration.as_millis();
        let started = Instant::now();

        let record_handle = tokio::task::spawn_blocking({
            let audio_buffer = Arc::clone(&self.audio_buffer);
            let is_recording = Arc::clone(&self.is_recording);
            let stop = Arc::clone(&stop);
            let limit = max_duration.as_std();
            move || Self::capture_blocking(audio_buffer, is_recording, stop, limit)
        });

        if let Some(progress) = on_progress {
            let is_recording = Arc::clone(&self.is_recording);
            tokio::spawn(async move {
                let mut ticker = interval(TokioDuration::from_millis(100));
                while is_recording.load(Ordering::SeqCst) {
                    ticker.tick().await;
                    let elapsed = (started.elapsed().as_millis() as u64).min(total_ms);
                    progress(elapsed, total_ms);
                }
            });
        }

        let joined = record_handle
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Task join error: {}", e)));
        self.is_recording.store(false, Ordering::SeqCst);
        let sample_rate = joined??;

        let elapsed_ms = (started.elapsed().as_millis() as u64).min(total_ms);

        let samples = self
            .audio_buffer
            .lock()
            .map(|mut buffer| std::mem::take(&mut *buffer))
            .map_err(|_| RecordingError::ReadFailed("Capture buffer poisoned".into()))?;

        if samples.is_empty() {
            return Err(RecordingError::ReadFailed(
                "No audio data captured".to_string(),
            ));
        }

        let flac = tokio::task::spawn_blocking(move || encode_to_flac(&samples, 1, sample_rate))
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Encode task error: {}", e)))?
            .map_err(|e| RecordingError::RecordingFailed(e.to_string()))?;

        Ok(CapturedAudio {
            blob: RawAudioBlob::new(flac, ContainerType::Flac),
            elapsed_ms,
        })
    }
}
