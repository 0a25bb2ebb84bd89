//! End-to-end command tests driving the binary's entry points with an
//! isolated settings file.

use asnkit::cli::{run, Cli};
use asnkit_settings::SettingsStore;
use clap::Parser;
use std::path::Path;

fn run_args(args: &[&str]) -> anyhow::Result<()> {
    run(Cli::try_parse_from(args).unwrap())
}

fn config_arg(dir: &Path) -> String {
    dir.join("config.json").to_string_lossy().into_owned()
}

#[test]
fn test_generate_writes_pdf_and_advances_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());
    let out = dir.path().join("labels.pdf");

    run_args(&[
        "asnkit",
        "--config",
        &config,
        "generate",
        "--start",
        "100",
        "--count",
        "10",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // The saved record continues the sequence past the generated range.
    let saved = SettingsStore::with_path(&config).try_load().unwrap();
    assert_eq!(saved.start, 110);
    assert_eq!(saved.count, 10);
}

#[test]
fn test_consecutive_runs_continue_the_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());

    for (i, expected_start) in [(0u32, 1u64), (1, 6), (2, 11)] {
        let out = dir.path().join(format!("batch{}.pdf", i));
        run_args(&[
            "asnkit",
            "--config",
            &config,
            "generate",
            "--count",
            "5",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();

        let saved = SettingsStore::with_path(&config).try_load().unwrap();
        assert_eq!(saved.start, expected_start + 5);
    }
}

#[test]
fn test_generate_rejects_zero_count() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());

    let result = run_args(&["asnkit", "--config", &config, "generate", "--count", "0"]);
    assert!(result.is_err());
    // Nothing is persisted on a failed run.
    assert!(!Path::new(&config).exists());
}

#[test]
fn test_preview_writes_single_label_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());
    let out = dir.path().join("preview.pdf");

    run_args(&[
        "asnkit",
        "--config",
        &config,
        "preview",
        "--kind",
        "code128",
        "-o",
        out.to_str().unwrap(),
    ])
    .unwrap();

    let bytes = std::fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    // Preview never persists anything.
    assert!(!Path::new(&config).exists());
}

#[test]
fn test_config_reset_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());

    run_args(&["asnkit", "--config", &config, "config", "reset"]).unwrap();

    let saved = SettingsStore::with_path(&config).try_load().unwrap();
    assert_eq!(saved.start, 1);
    assert_eq!(saved.prefix, "ASN");
}
