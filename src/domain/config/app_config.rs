//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::audio::SampleRate;
use crate::domain::export::{FormatSelection, Locale};
use crate::domain::recording::Duration;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub sample_rate: Option<u32>,
    pub language: Option<String>,
    pub duration: Option<String>,
    pub format: Option<String>,
    pub output_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            sample_rate: Some(SampleRate::default().hz()),
            language: Some(Locale::default().to_string()),
            duration: Some(Duration::default_duration().to_string()),
            format: Some(FormatSelection::default().to_string()),
            output_dir: Some(".".to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            sample_rate: other.sample_rate.or(self.sample_rate),
            language: other.language.or(self.language),
            duration: other.duration.or(self.duration),
            format: other.format.or(self.format),
            output_dir: other.output_dir.or(self.output_dir),
        }
    }

    /// Get sample rate, or 44100 Hz if not set/invalid
    pub fn sample_rate_or_default(&self) -> SampleRate {
        self.sample_rate
            .and_then(SampleRate::new)
            .unwrap_or_default()
    }

    /// Get language, or Chinese if not set/invalid
    pub fn language_or_default(&self) -> Locale {
        self.language
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get recording limit, or 10s if not set/invalid
    pub fn duration_or_default(&self) -> Duration {
        self.duration
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_duration)
    }

    /// Get format selection, or WAV only if not set/invalid
    pub fn format_or_default(&self) -> FormatSelection {
        self.format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get output directory, or the current directory if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        self.output_dir
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
