//! Export format selection

use std::fmt;
use std::str::FromStr;

use crate::domain::audio::ContainerType;
use crate::domain::error::InvalidFormatError;

/// Output format of a single export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// The recording's own compressed container, bytes unchanged
    RawContainer,
    /// 16-bit PCM WAV rendered at the recording's sample rate
    PcmContainer,
}

impl ExportFormat {
    /// File extension for a recording captured in `source`
    pub const fn extension(&self, source: ContainerType) -> &'static str {
        match self {
            Self::RawContainer => source.extension(),
            Self::PcmContainer => ContainerType::Wav.extension(),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RawContainer => write!(f, "raw"),
            Self::PcmContainer => write!(f, "wav"),
        }
    }
}

/// Which formats an export run produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatSelection {
    #[default]
    Wav,
    Raw,
    Both,
}

impl FormatSelection {
    pub fn formats(&self) -> &'static [ExportFormat] {
        match self {
            Self::Wav => &[ExportFormat::PcmContainer],
            Self::Raw => &[ExportFormat::RawContainer],
            Self::Both => &[ExportFormat::PcmContainer, ExportFormat::RawContainer],
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Raw => "raw",
            Self::Both => "both",
        }
    }
}

impl FromStr for FormatSelection {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wav" => Ok(Self::Wav),
            "raw" => Ok(Self::Raw),
            "both" => Ok(Self::Both),
            _ => Err(InvalidFormatError { input: s.to_string() }),
        }
    }
}

impl fmt::Display for FormatSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_keeps_source_extension() {
        assert_eq!(
            ExportFormat::RawContainer.extension(ContainerType::Webm),
            "webm"
        );
        assert_eq!(
            ExportFormat::RawContainer.extension(ContainerType::Flac),
            "flac"
        );
    }

    #[test]
    fn pcm_is_always_wav() {
        assert_eq!(ExportFormat::PcmContainer.extension(ContainerType::Webm), "wav");
    }

    #[test]
    fn selection_parses() {
        assert_eq!("both".parse::<FormatSelection>().unwrap(), FormatSelection::Both);
        assert_eq!(" WAV ".parse::<FormatSelection>().unwrap(), FormatSelection::Wav);
        assert!("mp3".parse::<FormatSelection>().is_err());
    }

    #[test]
    fn both_yields_wav_then_raw() {
        assert_eq!(
            FormatSelection::Both.formats(),
            &[ExportFormat::PcmContainer, ExportFormat::RawContainer]
        );
    }
}
