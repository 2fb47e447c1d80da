//! Display language and bilingual labels

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::domain::error::InvalidLocaleError;

/// Display language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Zh,
    En,
}

/// User-facing label identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    StartRecording,
    StopRecording,
    Playback,
    CurrentSampleRate,
    SampleRate,
    RecordingHistory,
    NoRecordings,
    Recording,
    Duration,
}

impl Locale {
    /// Get the string identifier for this locale
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }

    /// Look up a label in this language
    pub const fn label(&self, label: Label) -> &'static str {
        match (label, self) {
            (Label::StartRecording, Self::Zh) => "开始录音",
            (Label::StartRecording, Self::En) => "Start Recording",
            (Label::StopRecording, Self::Zh) => "停止录音",
            (Label::StopRecording, Self::En) => "Stop Recording",
            (Label::Playback, Self::Zh) => "回放",
            (Label::Playback, Self::En) => "Playing back",
            (Label::CurrentSampleRate, Self::Zh) => "当前采样率",
            (Label::CurrentSampleRate, Self::En) => "Current Sample Rate",
            (Label::SampleRate, Self::Zh) => "采样率",
            (Label::SampleRate, Self::En) => "Sample Rate",
            (Label::RecordingHistory, Self::Zh) => "录音历史",
            (Label::RecordingHistory, Self::En) => "Recording History",
            (Label::NoRecordings, Self::Zh) => "暂无录音",
            (Label::NoRecordings, Self::En) => "No recordings yet",
            (Label::Recording, Self::Zh) => "录音",
            (Label::Recording, Self::En) => "Recording",
            (Label::Duration, Self::Zh) => "时长",
            (Label::Duration, Self::En) => "Duration",
        }
    }

    /// Format a local date-time the way this locale displays it,
    /// e.g. `10/16/2026, 02:30:05 PM` (en) or `2026/10/16 14:30:05` (zh)
    pub fn format_datetime(&self, at: &NaiveDateTime) -> String {
        match self {
            Self::Zh => at.format("%Y/%m/%d %H:%M:%S").to_string(),
            Self::En => at.format("%m/%d/%Y, %I:%M:%S %p").to_string(),
        }
    }
}

impl FromStr for Locale {
    type Err = InvalidLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "cn" => Ok(Self::Zh),
            "en" | "en-us" => Ok(Self::En),
            _ => Err(InvalidLocaleError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
