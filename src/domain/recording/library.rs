//! In-memory recording library

use super::recording::{NewRecording, Recording, RecordingId};

/// Append-only list of recordings for the process lifetime.
///
/// Exports only ever borrow recordings, so a failed export cannot
/// remove or alter an entry.
#[derive(Debug, Default)]
pub struct RecordingLibrary {
    recordings: Vec<Recording>,
}

impl RecordingLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a recording and return its id
    pub fn add(&mut self, new: NewRecording) -> RecordingId {
        let id = self.next_id();
        self.recordings.push(Recording::new(
            id,
            new.blob,
            new.duration_secs,
            new.sample_rate,
            new.created_at,
        ));
        id
    }

    pub fn get(&self, id: RecordingId) -> Option<&Recording> {
        self.recordings.iter().find(|r| r.id() == id)
    }

    /// Recordings in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &Recording> {
        self.recordings.iter()
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }

    fn next_id(&self) -> RecordingId {
        self.recordings.last().map_or(1, |r| r.id() + 1)
    }
}
