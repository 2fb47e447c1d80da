//! Command runners for record, convert and rates

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;
use tracing::{debug, warn};

use crate::application::ports::ConfigStore;
use crate::application::{
    ExportRecordingUseCase, PreviewUseCase, RecordCallbacks, RecordInput, RecordUseCase,
};
use crate::domain::audio::{human_readable_size, ContainerType, RawAudioBlob, SampleRate};
use crate::domain::config::AppConfig;
use crate::domain::export::{suggested_filename, ExportFormat, FormatSelection, Label, Locale};
use crate::domain::recording::{Duration, Recording, RecordingLibrary};
use crate::infrastructure::{
    create_recorder, DirectorySaver, RodioPlayer, RubatoRenderer, SymphoniaDecoder,
    XdgConfigStore,
};

use super::args::{ConvertArgs, ExportArgs, RecordArgs};
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment overrides, applied between the config file and the CLI
pub const ENV_SAMPLE_RATE: &str = "VOICE_RECORDER_SAMPLE_RATE";
pub const ENV_OUTPUT_DIR: &str = "VOICE_RECORDER_OUTPUT_DIR";

type Exporter = ExportRecordingUseCase<SymphoniaDecoder, RubatoRenderer, DirectorySaver>;

/// Settings resolved for one export run
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub sample_rate: SampleRate,
    pub locale: Locale,
    pub output_dir: PathBuf,
}

impl ExportSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            sample_rate: config.sample_rate_or_default(),
            locale: config.language_or_default(),
            output_dir: config.output_dir_or_default(),
        }
    }
}

/// Turn the shared export flags into a partial config.
///
/// Returns a usage message when the sample rate does not parse.
pub fn export_args_config(args: &ExportArgs) -> Result<AppConfig, String> {
    let sample_rate = match args.sample_rate.as_deref() {
        Some(s) => Some(
            s.parse::<SampleRate>()
                .map_err(|e| format!("Invalid sample rate: {}", e))?
                .hz(),
        ),
        None => None,
    };

    Ok(AppConfig {
        sample_rate,
        language: args.language.map(|l| Locale::from(l).to_string()),
        output_dir: args
            .output_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string()),
        ..Default::default()
    })
}

/// Build the environment layer from variable lookups.
/// Values that fail to parse are ignored with a warning.
pub fn env_config(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let sample_rate = lookup(ENV_SAMPLE_RATE)
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| match s.parse::<SampleRate>() {
            Ok(rate) => Some(rate.hz()),
            Err(e) => {
                warn!(variable = ENV_SAMPLE_RATE, error = %e, "ignoring environment override");
                None
            }
        });

    AppConfig {
        sample_rate,
        output_dir: lookup(ENV_OUTPUT_DIR).filter(|s| !s.trim().is_empty()),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config(|key| env::var(key).ok()))
        .merge(cli_config)
}

fn exporter(output_dir: &Path) -> Exporter {
    ExportRecordingUseCase::new(
        SymphoniaDecoder::new(),
        RubatoRenderer::new(),
        DirectorySaver::new(output_dir),
    )
}

/// Record one or more takes, list them, then export every take
pub async fn run_record(args: RecordArgs) -> ExitCode {
    let mut presenter = Presenter::new();

    let mut cli_config = match export_args_config(&args.export) {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    cli_config.duration = args.duration.clone();
    cli_config.format = args.format.map(|f| FormatSelection::from(f).to_string());

    let config = load_merged_config(cli_config).await;
    let settings = ExportSettings::from_config(&config);
    let locale = settings.locale;

    // An explicit bad duration is a usage error, unlike a bad value in the file
    let max_duration = match args.duration.as_deref().map(str::parse::<Duration>) {
        Some(Err(e)) => {
            presenter.error(&format!("Invalid duration: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        Some(Ok(d)) => d,
        None => config.duration_or_default(),
    };
    let formats = config.format_or_default().formats();

    let use_case = RecordUseCase::new(create_recorder());
    let shutdown = ShutdownSignal::new();
    shutdown.setup(vec![use_case.stop_flag()]);

    presenter.info(&format!(
        "{}: {}",
        locale.label(Label::CurrentSampleRate),
        settings.sample_rate
    ));

    let mut library = RecordingLibrary::new();
    let input = RecordInput {
        max_duration,
        sample_rate: settings.sample_rate,
    };

    for take in 1..=args.takes {
        if shutdown.is_shutdown() {
            debug!(take, "interrupted before take");
            break;
        }

        let prefix = if args.takes > 1 {
            format!("{} {}/{}", locale.label(Label::StartRecording), take, args.takes)
        } else {
            locale.label(Label::StartRecording).to_string()
        };
        presenter.start_spinner(&prefix);

        let spinner = presenter.spinner_handle();
        let callbacks = RecordCallbacks {
            on_progress: Some(Arc::new(move |elapsed, total| {
                if let Some(ref spinner) = spinner {
                    spinner.set_message(format!(
                        "{} {}",
                        prefix,
                        Presenter::format_progress(elapsed, total)
                    ));
                }
            })),
            ..Default::default()
        };

        match use_case.execute(&mut library, input, callbacks).await {
            Ok(id) => {
                let size = library
                    .get(id)
                    .map(|r| r.blob().human_readable_size())
                    .unwrap_or_default();
                presenter.spinner_success(&format!(
                    "{} #{} ({})",
                    locale.label(Label::StopRecording),
                    id,
                    size
                ));

                if args.play {
                    if let Some(recording) = library.get(id) {
                        play_take(&mut presenter, recording, &shutdown, locale).await;
                    }
                }
            }
            Err(e) => {
                presenter.spinner_fail(&e.to_string());
                if library.is_empty() {
                    return ExitCode::from(EXIT_ERROR);
                }
                break;
            }
        }
    }

    presenter.recordings(library.iter(), locale);
    if library.is_empty() {
        return ExitCode::from(EXIT_ERROR);
    }

    let recordings: Vec<Recording> = library.iter().cloned().collect();
    export_recordings(&mut presenter, &recordings, formats, &settings).await
}

/// Play a take back. Failures are reported but do not stop the run.
async fn play_take(
    presenter: &mut Presenter,
    recording: &Recording,
    shutdown: &ShutdownSignal,
    locale: Locale,
) {
    let preview = PreviewUseCase::new(SymphoniaDecoder::new(), RodioPlayer::new());
    let label = format!("{} #{}", locale.label(Label::Playback), recording.id());

    presenter.start_spinner(&label);
    match preview.execute(recording, shutdown.flag()).await {
        Ok(duration_ms) => presenter.spinner_success(&format!(
            "{} ({})",
            label,
            Presenter::format_progress(duration_ms, duration_ms)
        )),
        Err(e) => {
            warn!(recording = recording.id(), error = %e, "playback failed");
            presenter.spinner_fail(&e.to_string());
        }
    }
}

async fn export_recordings(
    presenter: &mut Presenter,
    recordings: &[Recording],
    formats: &[ExportFormat],
    settings: &ExportSettings,
) -> ExitCode {
    let exporter = Arc::new(exporter(&settings.output_dir));

    presenter.start_spinner(&format!("Exporting to {}...", settings.output_dir.display()));
    let reports = exporter
        .export_all(recordings, formats, settings.locale)
        .await;

    let failed = reports.iter().filter(|r| r.result.is_err()).count();
    if failed == 0 {
        presenter.spinner_success(&format!("Exported {} file(s)", reports.len()));
    } else {
        presenter.spinner_fail(&format!("{} of {} export(s) failed", failed, reports.len()));
    }

    for report in &reports {
        match &report.result {
            Ok(output) => presenter.output(&output.path.display().to_string()),
            Err(e) => presenter.error(&format!(
                "Recording #{} ({}): {}",
                report.recording_id, report.format, e
            )),
        }
    }

    if failed == 0 {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Transcode an existing compressed file to WAV
pub async fn run_convert(args: ConvertArgs) -> ExitCode {
    let mut presenter = Presenter::new();

    let cli_config = match export_args_config(&args.export) {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let settings = ExportSettings::from_config(&load_merged_config(cli_config).await);

    let container = match args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ContainerType::from_extension)
    {
        Some(container) => container,
        None => {
            presenter.error(&format!(
                "Unsupported input file: {} (expected webm, ogg, flac, wav, mp3 or m4a)",
                args.input.display()
            ));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let bytes = match tokio::fs::read(&args.input).await {
        Ok(bytes) => bytes,
        Err(e) => {
            presenter.error(&format!("Failed to read {}: {}", args.input.display(), e));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let blob = RawAudioBlob::new(bytes, container);

    presenter.start_spinner(&format!("Converting at {}...", settings.sample_rate));
    let exporter = exporter(&settings.output_dir);

    let file = match exporter.transcode(&blob, settings.sample_rate).await {
        Ok(file) => file,
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let filename = suggested_filename(
        &Local::now().naive_local(),
        settings.locale,
        settings.sample_rate,
        ExportFormat::PcmContainer.extension(container),
    );

    match exporter.save(&filename, &file).await {
        Ok(path) => {
            presenter.spinner_success(&format!("Converted ({})", human_readable_size(file.len())));
            presenter.output(&path.display().to_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// List standard sample rates, marking the configured one
pub async fn run_rates() -> ExitCode {
    let config = load_merged_config(AppConfig::empty()).await;
    Presenter::new().sample_rates(config.sample_rate_or_default(), config.language_or_default());
    ExitCode::from(EXIT_SUCCESS)
}
