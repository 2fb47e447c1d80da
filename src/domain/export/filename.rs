//! Suggested export filenames

use chrono::NaiveDateTime;

use super::Locale;
use crate::domain::audio::SampleRate;

/// Make a locale-formatted timestamp safe for filenames:
/// `/` and `:` become `-`, commas are dropped, spaces become `_`.
pub fn filesystem_safe(formatted: &str) -> String {
    formatted
        .chars()
        .filter(|&c| c != ',')
        .map(|c| match c {
            '/' | ':' => '-',
            ' ' => '_',
            other => other,
        })
        .collect()
}

/// `recording_<timestamp>_<rate>Hz.<ext>`
pub fn suggested_filename(
    created_at: &NaiveDateTime,
    locale: Locale,
    sample_rate: SampleRate,
    extension: &str,
) -> String {
    let stamp = filesystem_safe(&locale.format_datetime(created_at));
    format!("recording_{}_{}Hz.{}", stamp, sample_rate.hz(), extension)
}
