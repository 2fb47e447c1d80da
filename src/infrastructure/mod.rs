//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the sound card, codecs and the filesystem.

pub mod config;
pub mod decoding;
pub mod playback;
pub mod recording;
pub mod rendering;
pub mod storage;

// Re-export adapters
pub use config::XdgConfigStore;
pub use decoding::SymphoniaDecoder;
pub use playback::RodioPlayer;
pub use recording::{create_recorder, CpalRecorder};
pub use rendering::RubatoRenderer;
pub use storage::DirectorySaver;
