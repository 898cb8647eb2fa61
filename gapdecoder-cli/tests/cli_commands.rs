//! Integration tests for the offline CLI commands.
//!
//! Each test runs the built binary with `HOME` pointing at a temporary
//! directory, so configuration and the log file stay out of the user's
//! real home.

use std::path::Path;
use std::process::{Command, Output};

use gapdecoder::crypto::TileDecryptor;
use tempfile::TempDir;

/// Run the CLI with an isolated home directory.
fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gapdecoder"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command")
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("{} failed:\nstdout: {}\nstderr: {}", context, stdout, stderr);
    }
}

#[test]
fn test_decrypt_writes_plain_file() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("tile.bin");
    let output = home.path().join("tile.jpg");

    let plain: Vec<u8> = (0u8..80).collect();
    let sealed = TileDecryptor::arts()
        .seal(&plain[..8], &plain[8..40], &plain[40..])
        .unwrap();
    std::fs::write(&input, sealed).unwrap();

    let result = run_cli(
        home.path(),
        &["decrypt", input.to_str().unwrap(), output.to_str().unwrap()],
    );
    assert_success(&result, "decrypt");

    assert_eq!(std::fs::read(&output).unwrap(), plain);
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("80 bytes"), "unexpected output: {}", stdout);
}

#[test]
fn test_decrypt_require_marker_rejects_plain_input() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("plain.jpg");
    let output = home.path().join("out.jpg");
    std::fs::write(&input, b"not an encrypted tile").unwrap();

    let result = run_cli(
        home.path(),
        &[
            "decrypt",
            "--require-marker",
            input.to_str().unwrap(),
            output.to_str().unwrap(),
        ],
    );

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).starts_with("Error: "));
    assert!(!output.exists());
}

#[test]
fn test_decrypt_missing_input_fails() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("out.jpg");

    let result = run_cli(
        home.path(),
        &["decrypt", "/nonexistent/tile.bin", output.to_str().unwrap()],
    );

    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("/nonexistent/tile.bin"));
}

#[test]
fn test_download_rejects_bad_quality_before_prompting() {
    let home = TempDir::new().unwrap();

    let result = run_cli(home.path(), &["download", "--quality", "120"]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("120"), "unexpected error: {}", stderr);
}

#[test]
fn test_invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".gapdecoder");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.ini"), "[download]\nmax_attempts = 0\n").unwrap();

    let output = home.path().join("out.jpg");
    let result = run_cli(
        home.path(),
        &["decrypt", "/nonexistent/tile.bin", output.to_str().unwrap()],
    );

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Configuration error"), "unexpected error: {}", stderr);
    assert!(stderr.contains("max_attempts"));
}
