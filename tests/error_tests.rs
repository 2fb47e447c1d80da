//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn voice_recorder_bin(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("voice-recorder").expect("binary should be built");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("VOICE_RECORDER_SAMPLE_RATE")
        .env_remove("VOICE_RECORDER_OUTPUT_DIR")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["config", "get", "unknown_key"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Valid keys"));
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["config", "set", "api_key", "secret"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_sample_rate() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["config", "set", "sample_rate", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("sample_rate"));
}

#[test]
fn config_set_invalid_language() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["config", "set", "language", "fr"])
        .assert()
        .code(1);
}

#[test]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["config", "init"])
        .assert()
        .success();
    voice_recorder_bin(&home)
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home).arg("play").assert().code(2);
}

#[test]
fn record_invalid_duration() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["record", "-d", "forever"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn record_invalid_sample_rate() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["record", "-r", "fast"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid sample rate"));
}

#[test]
fn record_zero_takes() {
    let home = TempDir::new().unwrap();
    voice_recorder_bin(&home)
        .args(["record", "-t", "0"])
        .assert()
        .code(2);
}

#[test]
fn convert_missing_file() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.webm");
    voice_recorder_bin(&home)
        .arg("convert")
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn convert_unsupported_extension() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("notes.txt");
    std::fs::write(&input, "hello").unwrap();

    voice_recorder_bin(&home)
        .arg("convert")
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unsupported input file"));
}

#[test]
fn convert_garbage_leaves_no_output() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("broken.ogg");
    std::fs::write(&input, [0x13u8; 512]).unwrap();
    let out_dir = home.path().join("out");

    voice_recorder_bin(&home)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .code(1);

    let written = std::fs::read_dir(&out_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(written, 0);
}
