//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod decoder;
pub mod file_saver;
pub mod player;
pub mod recorder;
pub mod renderer;

// Re-export common types
pub use config::ConfigStore;
pub use decoder::{AudioDecoder, DecodeError};
pub use file_saver::{FileSaver, SaveError};
pub use player::{AudioPlayer, PlaybackError};
pub use recorder::{AudioRecorder, CapturedAudio, ProgressCallback, RecordingError};
pub use renderer::{OfflineRenderer, RenderError, RenderSession};
