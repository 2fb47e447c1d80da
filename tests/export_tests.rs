//! End-to-end export tests: FLAC capture -> decode -> render -> WAV

use std::sync::Arc;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use voice_recorder::application::ExportRecordingUseCase;
use voice_recorder::domain::audio::{ContainerType, RawAudioBlob, SampleRate};
use voice_recorder::domain::export::{ExportFormat, Locale};
use voice_recorder::domain::recording::{NewRecording, RecordingLibrary};
use voice_recorder::infrastructure::recording::encode_to_flac;
use voice_recorder::infrastructure::{DirectorySaver, RubatoRenderer, SymphoniaDecoder};

/// Two flac blocks of a 440 Hz tone
const FRAMES: usize = 8192;

fn tone_flac(sample_rate: u32, channels: usize) -> Vec<u8> {
    let mut samples = Vec::with_capacity(FRAMES * channels);
    for i in 0..FRAMES {
        let t = i as f32 / sample_rate as f32;
        let s = ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 12000.0) as i16;
        for _ in 0..channels {
            samples.push(s);
        }
    }
    encode_to_flac(&samples, channels, sample_rate).unwrap()
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn exporter(
    dir: &TempDir,
) -> ExportRecordingUseCase<SymphoniaDecoder, RubatoRenderer, DirectorySaver> {
    ExportRecordingUseCase::new(
        SymphoniaDecoder::new(),
        RubatoRenderer::new(),
        DirectorySaver::new(dir.path()),
    )
}

#[tokio::test]
async fn transcode_flac_capture_to_wav() {
    let dir = TempDir::new().unwrap();
    let blob = RawAudioBlob::new(tone_flac(48000, 2), ContainerType::Flac);
    let rate = SampleRate::new(16000).unwrap();

    let file = exporter(&dir).transcode(&blob, rate).await.unwrap();
    let bytes = file.bytes();

    assert_eq!(file.container(), ContainerType::Wav);
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..16], b"WAVEfmt ");
    assert_eq!(u32_at(bytes, 16), 16);
    assert_eq!(u16_at(bytes, 20), 1);
    assert_eq!(u16_at(bytes, 22), 2);
    assert_eq!(u32_at(bytes, 24), 16000);
    // Byte rate is written as rate * 4 whatever the channel count
    assert_eq!(u32_at(bytes, 28), 64000);
    assert_eq!(u16_at(bytes, 32), 4);
    assert_eq!(u16_at(bytes, 34), 16);
    assert_eq!(&bytes[36..40], b"data");

    // Frame count follows the source, not the rate ratio
    let data_len = u32_at(bytes, 40) as usize;
    assert_eq!(data_len, FRAMES * 2 * 2);
    assert_eq!(u32_at(bytes, 4) as usize, 36 + data_len);
    assert_eq!(bytes.len(), 44 + data_len);
}

#[tokio::test]
async fn export_all_writes_both_formats() {
    let dir = TempDir::new().unwrap();
    let flac = tone_flac(44100, 1);

    let mut library = RecordingLibrary::new();
    library.add(NewRecording::now(
        RawAudioBlob::new(flac.clone(), ContainerType::Flac),
        0,
        SampleRate::new(22050).unwrap(),
    ));
    library.add(NewRecording::now(
        RawAudioBlob::new(vec![0x42; 64], ContainerType::Webm),
        0,
        SampleRate::new(8000).unwrap(),
    ));
    let recordings: Vec<_> = library.iter().cloned().collect();

    let use_case = Arc::new(exporter(&dir));
    let reports = use_case
        .export_all(
            &recordings,
            &[ExportFormat::PcmContainer, ExportFormat::RawContainer],
            Locale::En,
        )
        .await;

    assert_eq!(reports.len(), 4);

    let wav = reports[0].result.as_ref().unwrap();
    assert!(wav.filename.ends_with("_22050Hz.wav"));
    let wav_bytes = std::fs::read(&wav.path).unwrap();
    assert_eq!(u32_at(&wav_bytes, 24), 22050);
    assert_eq!(u32_at(&wav_bytes, 40) as usize, FRAMES * 2);

    let raw = reports[1].result.as_ref().unwrap();
    assert!(raw.filename.ends_with("_22050Hz.flac"));
    assert_eq!(std::fs::read(&raw.path).unwrap(), flac);

    // Undecodable recording fails its WAV export only
    assert!(reports[2].result.is_err());
    let raw_webm = reports[3].result.as_ref().unwrap();
    assert!(raw_webm.filename.ends_with("_8000Hz.webm"));
    assert_eq!(library.len(), 2);
}

#[test]
fn convert_command_writes_wav() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("take.flac");
    std::fs::write(&input, tone_flac(48000, 1)).unwrap();
    let out_dir = home.path().join("exports");

    Command::cargo_bin("voice-recorder")
        .unwrap()
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("VOICE_RECORDER_SAMPLE_RATE")
        .env_remove("VOICE_RECORDER_OUTPUT_DIR")
        .env("NO_COLOR", "1")
        .arg("convert")
        .arg(&input)
        .args(["-r", "8000", "-l", "en", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("_8000Hz.wav"));

    let written: Vec<_> = std::fs::read_dir(&out_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(written.len(), 1);

    let name = written[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("recording_"));
    assert!(name.ends_with("M_8000Hz.wav"), "unexpected name {name}");

    let bytes = std::fs::read(&written[0]).unwrap();
    assert_eq!(u32_at(&bytes, 24), 8000);
    assert_eq!(u32_at(&bytes, 40) as usize, FRAMES * 2);
}
