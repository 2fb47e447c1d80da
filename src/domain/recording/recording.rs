//! Recording entity

use chrono::{DateTime, Local};

use crate::domain::audio::{RawAudioBlob, SampleRate};

/// Identifier assigned by the library, starting at 1
pub type RecordingId = u32;

/// A finished capture: compressed audio plus what was known when it stopped
#[derive(Debug, Clone)]
pub struct Recording {
    id: RecordingId,
    blob: RawAudioBlob,
    duration_secs: u64,
    sample_rate: SampleRate,
    created_at: DateTime<Local>,
}

impl Recording {
    pub(crate) fn new(
        id: RecordingId,
        blob: RawAudioBlob,
        duration_secs: u64,
        sample_rate: SampleRate,
        created_at: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            blob,
            duration_secs,
            sample_rate,
            created_at,
        }
    }

    pub fn id(&self) -> RecordingId {
        self.id
    }

    pub fn blob(&self) -> &RawAudioBlob {
        &self.blob
    }

    /// Recorded length in whole seconds
    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Export sample rate chosen when the recording was made
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}

/// A recording not yet stored in a library
#[derive(Debug, Clone)]
pub struct NewRecording {
    pub blob: RawAudioBlob,
    pub duration_secs: u64,
    pub sample_rate: SampleRate,
    pub created_at: DateTime<Local>,
}

impl NewRecording {
    /// Stamp a capture with the current local time
    pub fn now(blob: RawAudioBlob, duration_secs: u64, sample_rate: SampleRate) -> Self {
        Self {
            blob,
            duration_secs,
            sample_rate,
            created_at: Local::now(),
        }
    }
}
