//! Export recording use case

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::audio::{encode_wav, ContainerFile, RawAudioBlob, SampleRate};
use crate::domain::error::AllocationError;
use crate::domain::export::{suggested_filename, ExportFormat, Locale};
use crate::domain::recording::{Recording, RecordingId};

use super::pipeline::{DecodeRenderPipeline, PipelineError};
use super::ports::{AudioDecoder, FileSaver, OfflineRenderer, SaveError};

/// Errors from a single export request
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Encoding failed: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Saving failed: {0}")]
    Save(#[from] SaveError),

    #[error("Export task failed: {0}")]
    TaskFailed(String),
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub recording_id: RecordingId,
    pub format: ExportFormat,
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: usize,
}

/// Outcome of one request in a batch
#[derive(Debug)]
pub struct ExportReport {
    pub recording_id: RecordingId,
    pub format: ExportFormat,
    pub result: Result<ExportOutput, ExportError>,
}

/// Turns recordings into files in either format
pub struct ExportRecordingUseCase<D, R, S>
where
    D: AudioDecoder,
    R: OfflineRenderer,
    S: FileSaver,
{
    pipeline: DecodeRenderPipeline<D, R>,
    saver: S,
}

impl<D, R, S> ExportRecordingUseCase<D, R, S>
where
    D: AudioDecoder,
    R: OfflineRenderer,
    S: FileSaver,
{
    pub fn new(decoder: D, renderer: R, saver: S) -> Self {
        Self {
            pipeline: DecodeRenderPipeline::new(decoder, renderer),
            saver,
        }
    }

    /// Decode, render at `target`, and encode as a WAV container
    pub async fn transcode(
        &self,
        blob: &RawAudioBlob,
        target: SampleRate,
    ) -> Result<ContainerFile, ExportError> {
        let rendered = self.pipeline.run(blob, target).await?;
        Ok(encode_wav(&rendered)?)
    }

    /// Save an already-encoded file under its suggested name
    pub async fn save(&self, filename: &str, file: &ContainerFile) -> Result<PathBuf, ExportError> {
        Ok(self.saver.save(filename, file.bytes()).await?)
    }

    /// Export one recording in one format.
    ///
    /// The recording is only read; a failure leaves it untouched.
    pub async fn export(
        &self,
        recording: &Recording,
        format: ExportFormat,
        locale: Locale,
    ) -> Result<ExportOutput, ExportError> {
        let blob = recording.blob();
        let file = match format {
            ExportFormat::RawContainer => {
                ContainerFile::new(blob.data().to_vec(), blob.container())
            }
            ExportFormat::PcmContainer => self.transcode(blob, recording.sample_rate()).await?,
        };

        let filename = suggested_filename(
            &recording.created_at().naive_local(),
            locale,
            recording.sample_rate(),
            format.extension(blob.container()),
        );
        let path = self.save(&filename, &file).await?;

        info!(recording = recording.id(), %format, path = %path.display(), "exported");

        Ok(ExportOutput {
            recording_id: recording.id(),
            format,
            filename,
            path,
            size_bytes: file.len(),
        })
    }
}

impl<D, R, S> ExportRecordingUseCase<D, R, S>
where
    D: AudioDecoder + 'static,
    R: OfflineRenderer + 'static,
    S: FileSaver + 'static,
{
    /// Run every (recording, format) export as its own task.
    ///
    /// Requests share nothing mutable, so one failure has no effect on
    /// the others. Reports come back in request order.
    pub async fn export_all(
        self: &Arc<Self>,
        recordings: &[Recording],
        formats: &[ExportFormat],
        locale: Locale,
    ) -> Vec<ExportReport> {
        let mut handles = Vec::with_capacity(recordings.len() * formats.len());

        for recording in recordings {
            for &format in formats {
                let use_case = Arc::clone(self);
                let recording = recording.clone();
                let recording_id = recording.id();
                let handle =
                    tokio::spawn(async move { use_case.export(&recording, format, locale).await });
                handles.push((recording_id, format, handle));
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        for (recording_id, format, handle) in handles {
            let result = handle
                .await
                .unwrap_or_else(|e| Err(ExportError::TaskFailed(e.to_string())));
            if let Err(ref e) = result {
                warn!(recording = recording_id, %format, error = %e, "export failed");
            }
            reports.push(ExportReport {
                recording_id,
                format,
                result,
            });
        }

        reports
    }
}
