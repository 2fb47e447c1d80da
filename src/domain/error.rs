//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>s, <number>m, or <number>m<number>s (e.g., 30s, 1m, 2m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a sample rate is not a positive integer
#[derive(Debug, Clone, Error)]
#[error("Invalid sample rate: \"{input}\". Expected a positive integer in Hz (e.g., 16000, 44100, 48000)")]
pub struct InvalidSampleRateError {
    pub input: String,
}

/// Error when an unknown language is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid language: \"{input}\". Valid languages are: zh, en")]
pub struct InvalidLocaleError {
    pub input: String,
}

/// Error when an unknown export format is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid format: \"{input}\". Valid formats are: wav, raw, both")]
pub struct InvalidFormatError {
    pub input: String,
}

/// Error when a PCM buffer's shape is inconsistent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcmBufferError {
    #[error("PCM buffer must have at least one channel")]
    NoChannels,

    #[error("PCM buffer has {0} channels, at most 65535 are supported")]
    TooManyChannels(usize),

    #[error("PCM buffer sample rate must be positive")]
    ZeroSampleRate,

    #[error("Channel {channel} has {actual} frames, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
}

/// Error when an output buffer cannot be constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Audio data of {data_bytes} bytes exceeds the 4 GiB container limit")]
    SizeLimit { data_bytes: u64 },

    #[error("Failed to allocate {requested_bytes} bytes for the output buffer")]
    OutOfMemory { requested_bytes: usize },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
