//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::export::{FormatSelection, Locale};

/// Voice Recorder - capture takes and export them as WAV
#[derive(Parser, Debug)]
#[command(name = "voice-recorder")]
#[command(version)]
#[command(about = "Record from the microphone and export recordings as 16-bit PCM WAV")]
#[command(long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record takes from the microphone and export them
    Record(RecordArgs),
    /// Convert an existing audio file to WAV
    Convert(ConvertArgs),
    /// List the standard export sample rates
    Rates,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Options shared by every command that writes exports
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Export sample rate in Hz (e.g., 16000, 44100)
    #[arg(short = 'r', long, value_name = "RATE")]
    pub sample_rate: Option<String>,

    /// Directory the exported files are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Language for labels and file timestamps
    #[arg(short = 'l', long, value_name = "LANG")]
    pub language: Option<LanguageArg>,
}

/// Options for `record`
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Maximum length of each take (e.g., 10s, 1m, 2m30s)
    #[arg(short = 'd', long, value_name = "TIME")]
    pub duration: Option<String>,

    /// Which files to export for each take
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Number of takes to record before exporting
    #[arg(short = 't', long, value_name = "TAKES", default_value_t = 1,
          value_parser = clap::value_parser!(u32).range(1..))]
    pub takes: u32,

    /// Play each take back once it is recorded
    #[arg(long)]
    pub play: bool,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Options for `convert`
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Compressed audio file to convert (webm, ogg, flac, mp3, m4a, wav)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Format argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// 16-bit PCM WAV only
    Wav,
    /// The captured container, unchanged
    Raw,
    /// WAV and the captured container
    Both,
}

impl From<FormatArg> for FormatSelection {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Wav => FormatSelection::Wav,
            FormatArg::Raw => FormatSelection::Raw,
            FormatArg::Both => FormatSelection::Both,
        }
    }
}

/// Language argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    Zh,
    En,
}

impl From<LanguageArg> for Locale {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Zh => Locale::Zh,
            LanguageArg::En => Locale::En,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "sample_rate",
    "language",
    "duration",
    "format",
    "output_dir",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
