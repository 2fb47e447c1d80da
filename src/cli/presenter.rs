//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::audio::SampleRate;
use crate::domain::export::{Label, Locale};
use crate::domain::recording::{format_clock, Recording};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Handle to the active spinner, for updates from other tasks
    pub fn spinner_handle(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Recording clock and bar, e.g. `[████░░…] 00:04 / 00:10`
    pub fn format_progress(elapsed_ms: u64, total_ms: u64) -> String {
        let percent = if total_ms > 0 {
            (elapsed_ms as f64 / total_ms as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {} / {}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            format_clock(elapsed_ms / 1000),
            format_clock(total_ms / 1000)
        )
    }

    /// One line of the recording history
    pub fn format_recording(recording: &Recording, locale: Locale) -> String {
        format!(
            "{} #{}  {}  {}: {}  {}: {}  ({})",
            locale.label(Label::Recording),
            recording.id(),
            locale.format_datetime(&recording.created_at().naive_local()),
            locale.label(Label::Duration),
            format_clock(recording.duration_secs()),
            locale.label(Label::SampleRate),
            recording.sample_rate(),
            recording.blob().human_readable_size()
        )
    }

    /// Print the recording history with localized labels
    pub fn recordings<'a>(
        &self,
        recordings: impl IntoIterator<Item = &'a Recording>,
        locale: Locale,
    ) {
        println!("{}", locale.label(Label::RecordingHistory).bold());
        let mut any = false;
        for recording in recordings {
            println!("  {}", Self::format_recording(recording, locale));
            any = true;
        }
        if !any {
            println!("  {}", locale.label(Label::NoRecordings).dimmed());
        }
    }

    /// Print the standard rates, marking the configured one
    pub fn sample_rates(&self, current: SampleRate, locale: Locale) {
        println!(
            "{}: {}",
            locale.label(Label::CurrentSampleRate).cyan(),
            current
        );
        for rate in SampleRate::standard() {
            if rate == current {
                println!("{} {}", "●".green(), rate.to_string().bold());
            } else {
                println!("  {}", rate);
            }
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::{ContainerType, RawAudioBlob};
    use crate::domain::recording::{NewRecording, RecordingLibrary};

    #[test]
    fn format_progress_at_start() {
        let progress = Presenter::format_progress(0, 10_000);
        assert!(progress.contains("00:00 / 00:10"));
    }

    #[test]
    fn format_progress_past_a_minute() {
        let progress = Presenter::format_progress(65_000, 120_000);
        assert!(progress.contains("01:05 / 02:00"));
    }

    #[test]
    fn format_progress_zero_total() {
        let progress = Presenter::format_progress(0, 0);
        assert!(progress.contains("00:00 / 00:00"));
    }

    #[test]
    fn format_recording_uses_locale_labels() {
        let mut library = RecordingLibrary::new();
        let id = library.add(NewRecording::now(
            RawAudioBlob::new(vec![0; 2048], ContainerType::Flac),
            75,
            SampleRate::new(16000).unwrap(),
        ));
        let recording = library.get(id).unwrap();

        let en = Presenter::format_recording(recording, Locale::En);
        assert!(en.starts_with("Recording #1"));
        assert!(en.contains("Duration: 01:15"));
        assert!(en.contains("Sample Rate: 16000 Hz"));

        let zh = Presenter::format_recording(recording, Locale::Zh);
        assert!(zh.starts_with("录音 #1"));
        assert!(zh.contains("时长: 01:15"));
    }
}
