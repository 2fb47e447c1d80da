//! Voice Recorder - microphone capture and WAV export
//!
//! This crate records audio from the microphone, keeps each take in an
//! in-memory library, and exports takes either as the captured container
//! or as 16-bit PCM WAV rendered at a chosen sample rate.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects, the recording library, the WAV encoder, and errors
//! - **Application**: Use cases (record, decode/render pipeline, export) and port traits
//! - **Infrastructure**: Adapters (cpal, flacenc, symphonia, rubato, filesystem, XDG config)
//! - **CLI**: Argument parsing, presentation, logging, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
