//! Sample rate value object

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidSampleRateError;

/// Sample rates offered in settings, in Hz
pub const STANDARD_SAMPLE_RATES: &[u32] = &[8000, 16000, 22050, 24000, 44100, 48000];

/// Default export sample rate (44.1kHz)
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44100;

/// Value object representing a sample rate in Hz.
/// Any positive integer is accepted; the standard set is advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SampleRate(u32);

impl SampleRate {
    /// Create a sample rate, rejecting zero
    pub const fn new(hz: u32) -> Option<Self> {
        if hz == 0 {
            None
        } else {
            Some(Self(hz))
        }
    }

    /// Get the rate in Hz
    pub const fn hz(&self) -> u32 {
        self.0
    }

    /// Whether this rate is one of the standard settings choices
    pub fn is_standard(&self) -> bool {
        STANDARD_SAMPLE_RATES.contains(&self.0)
    }

    /// All standard settings choices
    pub fn standard() -> impl Iterator<Item = SampleRate> {
        STANDARD_SAMPLE_RATES.iter().map(|&hz| SampleRate(hz))
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self(DEFAULT_SAMPLE_RATE_HZ)
    }
}

impl TryFrom<u32> for SampleRate {
    type Error = InvalidSampleRateError;

    fn try_from(hz: u32) -> Result<Self, Self::Error> {
        Self::new(hz).ok_or_else(|| InvalidSampleRateError {
            input: hz.to_string(),
        })
    }
}

impl FromStr for SampleRate {
    type Err = InvalidSampleRateError;

    /// Parse "44100", "44100hz" or "44100 Hz"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let digits = lower.strip_suffix("hz").unwrap_or(&lower).trim_end();

        digits
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| InvalidSampleRateError { input: s.to_string() })
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_number() {
        let rate: SampleRate = "48000".parse().unwrap();
        assert_eq!(rate.hz(), 48000);
    }

    #[test]
    fn parse_with_unit_suffix() {
        assert_eq!("16000hz".parse::<SampleRate>().unwrap().hz(), 16000);
        assert_eq!("22050 Hz".parse::<SampleRate>().unwrap().hz(), 22050);
    }

    #[test]
    fn parse_rejects_zero_and_garbage() {
        assert!("0".parse::<SampleRate>().is_err());
        assert!("-1".parse::<SampleRate>().is_err());
        assert!("fast".parse::<SampleRate>().is_err());
        assert!("".parse::<SampleRate>().is_err());
    }

    #[test]
    fn non_standard_rate_is_accepted() {
        let rate: SampleRate = "11025".parse().unwrap();
        assert!(!rate.is_standard());
    }

    #[test]
    fn standard_rates_in_order() {
        let rates: Vec<u32> = SampleRate::standard().map(|r| r.hz()).collect();
        assert_eq!(rates, vec![8000, 16000, 22050, 24000, 44100, 48000]);
    }

    #[test]
    fn default_is_44100() {
        assert_eq!(SampleRate::default().hz(), 44100);
        assert!(SampleRate::default().is_standard());
    }

    #[test]
    fn display_with_unit() {
        assert_eq!(SampleRate::default().to_string(), "44100 Hz");
    }

    #[test]
    fn try_from_zero_fails() {
        assert!(SampleRate::try_from(0).is_err());
        assert_eq!(SampleRate::try_from(8000).unwrap().hz(), 8000);
    }
}
