//! Domain layer - Core business logic
//!
//! Contains value objects, entities, the PCM container encoder, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod recording;

// Re-export common types
pub use audio::{ContainerFile, ContainerType, PcmBuffer, RawAudioBlob, SampleRate};
pub use config::AppConfig;
pub use error::*;
pub use export::{ExportFormat, FormatSelection, Locale};
pub use recording::{Duration, Recording, RecordingLibrary};
